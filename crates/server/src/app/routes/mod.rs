use axum::Router;

pub mod cart;
pub mod inventory;
pub mod system;

/// Router for the cart and inventory resources.
pub fn router() -> Router {
    Router::new()
        .merge(cart::router())
        .merge(inventory::router())
}
