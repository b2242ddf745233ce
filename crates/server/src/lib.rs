//! Development REST backend for the cart client.
//!
//! Serves `/cart` and `/inventory` from memory with json-server semantics,
//! seeded from a `db.json`-shaped document.

pub mod app;
pub mod config;

pub use config::ServerConfig;
