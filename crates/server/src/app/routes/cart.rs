use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use cartsync_core::{NewCartItem, QuantityPatch};

use crate::app::errors;
use crate::app::{SharedDb, lock_db};

pub fn router() -> Router {
    Router::new()
        .route("/cart", get(list_cart).post(create_cart_item))
        .route("/cart/:id", patch(update_cart_item).delete(delete_cart_item))
}

pub async fn list_cart(Extension(db): Extension<SharedDb>) -> axum::response::Response {
    Json(lock_db(&db).cart().to_vec()).into_response()
}

pub async fn create_cart_item(
    Extension(db): Extension<SharedDb>,
    Json(body): Json<NewCartItem>,
) -> axum::response::Response {
    let result = lock_db(&db).insert_cart(body);
    match result {
        Ok(item) => {
            tracing::info!(id = %item.id, content = %item.content, quantity = item.quantity, "cart item created");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::db_error_to_response(e),
    }
}

pub async fn update_cart_item(
    Extension(db): Extension<SharedDb>,
    Path(id): Path<String>,
    Json(body): Json<QuantityPatch>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = lock_db(&db).patch_cart(id, body.quantity);
    match result {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::db_error_to_response(e),
    }
}

pub async fn delete_cart_item(
    Extension(db): Extension<SharedDb>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = lock_db(&db).remove_cart(id);
    match result {
        Ok(item) => {
            tracing::info!(%id, "cart item deleted");
            Json(item).into_response()
        }
        Err(e) => errors::db_error_to_response(e),
    }
}
