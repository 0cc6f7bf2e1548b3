//! Error types for the cache cluster.

use thiserror::Error;

use crate::registry::types::NodeId;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("peer {node} unreachable: {reason}")]
    Transport { node: NodeId, reason: String },

    #[error("peer {node} rejected the call (status {status})")]
    Rejected { node: NodeId, status: u16 },

    #[error("key '{key}' is indexed to node {owner}, which holds no value for it")]
    DanglingIndex { key: String, owner: NodeId },

    #[error("peer connections are not established yet")]
    NotReady,

    #[error("peer connections were already installed by an earlier bootstrap")]
    AlreadyConnected,

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("node {0} is not part of the cluster")]
    UnknownNode(NodeId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
