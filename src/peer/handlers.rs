use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use super::protocol::*;
use crate::cache::store::CacheStore;
use crate::cache::types::CacheEntry;
use crate::registry::types::NodeId;

/// Router served on the peer port. Handlers only touch the local store.
pub fn router(local: NodeId, store: Arc<CacheStore>) -> Router {
    Router::new()
        .route(ENDPOINT_PING, get(handle_ping))
        .route(ENDPOINT_GET_DATA, post(handle_get_data))
        .route(ENDPOINT_SET_DATA, post(handle_set_data))
        .route(ENDPOINT_SET_INDEX, post(handle_set_index))
        .route(ENDPOINT_DELETE_INDEX, post(handle_delete_index))
        .layer(Extension(store))
        .layer(Extension(local))
}

pub async fn handle_ping(Extension(local): Extension<NodeId>) -> Json<PingResponse> {
    Json(PingResponse { node: local })
}

pub async fn handle_get_data(
    Extension(store): Extension<Arc<CacheStore>>,
    Json(req): Json<GetDataRequest>,
) -> (StatusCode, Json<GetDataResponse>) {
    let response = match store.get(&req.key) {
        Some(CacheEntry::Owned(value)) => GetDataResponse {
            value,
            owner: None,
            found: true,
        },
        Some(CacheEntry::Indexed(owner)) => GetDataResponse {
            value: String::new(),
            owner: Some(owner),
            found: true,
        },
        None => GetDataResponse::not_found(),
    };
    (StatusCode::OK, Json(response))
}

pub async fn handle_set_data(
    Extension(store): Extension<Arc<CacheStore>>,
    Json(req): Json<SetDataRequest>,
) -> (StatusCode, Json<AckResponse>) {
    store.set_owned(req.key, req.value);
    (StatusCode::OK, Json(AckResponse { success: true }))
}

pub async fn handle_set_index(
    Extension(local): Extension<NodeId>,
    Extension(store): Extension<Arc<CacheStore>>,
    Json(req): Json<SetIndexRequest>,
) -> (StatusCode, Json<AckResponse>) {
    if req.owner == local {
        tracing::warn!(
            "Rejected index for key {} pointing at this node ({})",
            req.key,
            local
        );
        return (
            StatusCode::CONFLICT,
            Json(AckResponse { success: false }),
        );
    }
    store.set_indexed(req.key, req.owner);
    (StatusCode::OK, Json(AckResponse { success: true }))
}

pub async fn handle_delete_index(
    Extension(store): Extension<Arc<CacheStore>>,
    Json(req): Json<DeleteIndexRequest>,
) -> (StatusCode, Json<DeleteIndexResponse>) {
    let existed = store.delete(&req.key);
    (StatusCode::OK, Json(DeleteIndexResponse { existed }))
}
