//! HTTP application wiring (Axum router + shared in-memory tables).
//!
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `errors.rs`: consistent error responses

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{Extension, Router, routing::get};

use cartsync_store::{CartDb, Seed};

pub mod errors;
pub mod routes;

/// Tables shared by all handlers.
pub type SharedDb = Arc<Mutex<CartDb>>;

pub fn shared_db(seed: Seed) -> SharedDb {
    Arc::new(Mutex::new(CartDb::from_seed(seed)))
}

pub(crate) fn lock_db(db: &SharedDb) -> MutexGuard<'_, CartDb> {
    db.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(seed: Seed) -> Router {
    build_app_with_db(shared_db(seed))
}

/// Build the router over existing tables (lets tests inspect server state).
pub fn build_app_with_db(db: SharedDb) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(db))
}
