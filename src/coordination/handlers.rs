use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

use super::protocol::{PutCommand, get_response_body, key_from_path};
use super::service::CoordinationService;

/// Router served on the client port.
pub fn router(coordinator: Arc<CoordinationService>) -> Router {
    Router::new()
        .route("/", post(handle_put))
        .route("/*path", get(handle_get).delete(handle_delete))
        .layer(Extension(coordinator))
}

pub async fn handle_put(
    Extension(coordinator): Extension<Arc<CoordinationService>>,
    body: String,
) -> StatusCode {
    let command = match PutCommand::parse(&body) {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("Rejected put request: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    match coordinator.put(&command.key, &command.value).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to put key {}: {}", command.key, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn handle_get(
    Extension(coordinator): Extension<Arc<CoordinationService>>,
    Path(path): Path<String>,
) -> Response {
    let key = match key_from_path(&path) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Rejected get request: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match coordinator.get(key).await {
        Ok(Some(value)) => (StatusCode::OK, Json(get_response_body(key, value))).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to get key {}: {}", key, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn handle_delete(
    Extension(coordinator): Extension<Arc<CoordinationService>>,
    Path(path): Path<String>,
) -> (StatusCode, Json<u32>) {
    let key = match key_from_path(&path) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Rejected delete request: {}", e);
            return (StatusCode::BAD_REQUEST, Json(0));
        }
    };

    match coordinator.delete(key).await {
        Ok(report) => (StatusCode::OK, Json(u32::from(report.existed()))),
        Err(e) => {
            tracing::error!("Failed to delete key {}: {}", key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(0))
        }
    }
}
