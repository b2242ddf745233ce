//! `cartsync-client`
//!
//! **Responsibility:** keep a local mirror of the remote cart and inventory
//! consistent with the backend while the user mutates it.
//!
//! This crate provides:
//! - `CartState`, an observable container with a single subscriber
//! - `Controller`, which applies optimistic local changes, issues the remote
//!   write, then replaces local state with the server's answer
//! - A click dispatch table mapping delegated UI events to controller actions
//! - The `RenderSink` contract the view implements
//!
//! The backend stays the authority: there is no offline mode, no rollback
//! and no persistence beyond the remote store.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod edit;
pub mod error;
pub mod freshness;
pub mod render;
pub mod state;

pub use config::ClientConfig;
pub use controller::Controller;
pub use dispatch::{Action, ClickEvent, Container, Element};
pub use edit::EditBuffer;
pub use error::ActionError;
pub use render::{RenderSink, TerminalSink};
pub use state::{CartState, Subscriber};
