//! Peer Network Protocol
//!
//! Endpoints and Data Transfer Objects for the internal remote-call interface.
//! Every call is a POST carrying a JSON body, except the liveness probe used
//! while connecting.

use serde::{Deserialize, Serialize};

use crate::registry::types::NodeId;

// --- API Endpoints ---

/// Liveness probe answered with the responder's node id.
pub const ENDPOINT_PING: &str = "/internal/ping";
/// Reads the responder's local entry for a key.
pub const ENDPOINT_GET_DATA: &str = "/internal/get_data";
/// Stores an authoritative value on the responder.
pub const ENDPOINT_SET_DATA: &str = "/internal/set_data";
/// Stores a pointer to the owner node on the responder.
pub const ENDPOINT_SET_INDEX: &str = "/internal/set_index";
/// Removes the responder's entry for a key.
pub const ENDPOINT_DELETE_INDEX: &str = "/internal/delete_index";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub node: NodeId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetDataRequest {
    pub key: String,
}

/// Local view of a key on the responding node.
///
/// `owner` is `None` when the responder holds the value itself; `value` is
/// only meaningful in that case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetDataResponse {
    pub value: String,
    pub owner: Option<NodeId>,
    pub found: bool,
}

impl GetDataResponse {
    pub fn not_found() -> Self {
        Self {
            value: String::new(),
            owner: None,
            found: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetDataRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetIndexRequest {
    pub key: String,
    pub owner: NodeId,
}

/// Acknowledgement for the two write calls.
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteIndexRequest {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteIndexResponse {
    /// Whether the responder had an entry before the call.
    pub existed: bool,
}
