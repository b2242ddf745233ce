//! `cartsync-store`
//!
//! **Responsibility:** talk to the remote cart/inventory resources.
//!
//! This crate provides:
//! - The `RemoteStore` contract (one method per REST operation, plus checkout)
//! - `HttpStore`, the reqwest-backed client for the REST backend
//! - `InMemoryStore`, a journaling in-process store for tests and development
//! - `CartDb`, the table semantics shared with the development server
//!
//! The store holds no client-side state: every call returns the server's
//! current representation of the affected resource.

pub mod error;
pub mod http;
pub mod in_memory;
pub mod memory;
pub mod remote;

pub use error::{StoreError, StoreResult};
pub use http::HttpStore;
pub use in_memory::{InMemoryStore, StoreCall};
pub use memory::{CartDb, DbError, Seed};
pub use remote::{CheckoutOutcome, RemoteStore};
