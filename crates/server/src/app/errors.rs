use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cartsync_core::ItemId;
use cartsync_store::DbError;

pub fn db_error_to_response(err: DbError) -> axum::response::Response {
    match err {
        DbError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DbError::DuplicateId(_) => json_error(StatusCode::CONFLICT, "duplicate_id", err.to_string()),
        DbError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse()
        .map_err(|e: cartsync_core::DomainError| {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
        })
}
