//! Node Registry Module
//!
//! Static description of the cluster: which nodes exist and where their peer
//! endpoints live. The table is built once from configuration before any other
//! component starts and is never mutated afterwards, so the cluster size `N` is
//! fixed for the lifetime of the process.

pub mod types;


use crate::error::CacheError;
use types::{NodeAddress, NodeId};

/// Lookup table from [`NodeId`] to [`NodeAddress`].
///
/// Node ids are dense: the entry at position `i` belongs to `NodeId(i)`.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    nodes: Vec<NodeAddress>,
}

impl NodeRegistry {
    pub fn new(nodes: Vec<NodeAddress>) -> Result<Self, CacheError> {
        if nodes.is_empty() {
            return Err(CacheError::InvalidConfig(
                "the cluster needs at least one node".to_string(),
            ));
        }
        Ok(Self { nodes })
    }

    /// Parses a list of `host:port` entries, in node id order.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, CacheError> {
        let nodes = entries
            .iter()
            .map(|entry| entry.as_ref().parse())
            .collect::<Result<Vec<NodeAddress>, _>>()?;
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn address(&self, id: NodeId) -> Result<&NodeAddress, CacheError> {
        self.nodes.get(id.index()).ok_or(CacheError::UnknownNode(id))
    }

    /// All node ids in increasing order, the order every broadcast sweep uses.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeAddress)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, addr)| (NodeId(i as u32), addr))
    }
}
