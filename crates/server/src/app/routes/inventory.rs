use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, patch},
};

use cartsync_core::QuantityPatch;

use crate::app::errors;
use crate::app::{SharedDb, lock_db};

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/inventory/:id", patch(update_inventory_item))
}

pub async fn list_inventory(Extension(db): Extension<SharedDb>) -> axum::response::Response {
    Json(lock_db(&db).inventory().to_vec()).into_response()
}

pub async fn update_inventory_item(
    Extension(db): Extension<SharedDb>,
    Path(id): Path<String>,
    Json(body): Json<QuantityPatch>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = lock_db(&db).patch_inventory(id, body.quantity);
    match result {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::db_error_to_response(e),
    }
}
