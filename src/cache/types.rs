use serde::{Deserialize, Serialize};

use crate::registry::types::NodeId;

/// A node's local record for one key.
///
/// Created by a Put (as `Owned` on the writer, as `Indexed` everywhere else),
/// replaced wholesale by a later Put and removed by a Delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CacheEntry {
    /// This node holds the authoritative value.
    Owned(String),
    /// The value lives on another node.
    Indexed(NodeId),
}
