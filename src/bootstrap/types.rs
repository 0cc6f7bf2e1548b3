use crate::registry::types::NodeId;

/// Progress of the startup connection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unconnected,
    /// Waiting for a live handle to this node.
    Connecting(NodeId),
    Ready,
}

impl BootstrapState {
    pub fn is_ready(&self) -> bool {
        matches!(self, BootstrapState::Ready)
    }
}
