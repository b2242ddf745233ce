//! `cartsync-core`: data model shared by the cart client, store and server.
//!
//! This crate contains **pure data** (no IO, no HTTP, no async).

pub mod error;
pub mod id;
pub mod item;

pub use error::DomainError;
pub use id::ItemId;
pub use item::{CartItem, DeletedRecord, InventoryItem, NewCartItem, QuantityPatch, Resource};
