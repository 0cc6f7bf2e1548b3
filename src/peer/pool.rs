use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::watch;

use super::client::PeerHandle;
use crate::bootstrap::types::BootstrapState;
use crate::error::CacheError;
use crate::registry::types::NodeId;

/// One long-lived handle per node, indexed by [`NodeId`].
///
/// The handles are installed all at once when bootstrap finishes; until then
/// every lookup waits on the published [`BootstrapState`].
pub struct PeerConnectionPool {
    handles: OnceLock<Vec<PeerHandle>>,
    state: watch::Sender<BootstrapState>,
}

impl Default for PeerConnectionPool {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerConnectionPool {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BootstrapState::Unconnected);
        Self {
            handles: OnceLock::new(),
            state,
        }
    }

    /// A pool that is already `Ready` with the given handles.
    pub fn with_handles(handles: Vec<PeerHandle>) -> Self {
        let pool = Self::new();
        // A fresh pool has no handles, installing cannot fail.
        let _ = pool.install(handles);
        pool
    }

    pub fn state(&self) -> BootstrapState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.state.subscribe()
    }

    pub(crate) fn advance(&self, state: BootstrapState) {
        self.state.send_replace(state);
    }

    /// Installs the handles and enters `Ready`. Only the first call succeeds.
    pub fn install(&self, handles: Vec<PeerHandle>) -> Result<(), CacheError> {
        self.handles.set(handles).map_err(|_| CacheError::AlreadyConnected)?;
        self.state.send_replace(BootstrapState::Ready);
        Ok(())
    }

    /// Waits up to `timeout` for bootstrap to reach `Ready`.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<(), CacheError> {
        if self.handles.get().is_some() {
            return Ok(());
        }
        let mut state = self.state.subscribe();
        match tokio::time::timeout(timeout, state.wait_for(BootstrapState::is_ready)).await {
            Ok(Ok(_)) => Ok(()),
            _ => Err(CacheError::NotReady),
        }
    }

    /// Returns the handle for `id`, waiting up to `timeout` for readiness.
    pub async fn handle(&self, id: NodeId, timeout: Duration) -> Result<PeerHandle, CacheError> {
        self.wait_ready(timeout).await?;
        self.handles
            .get()
            .and_then(|handles| handles.get(id.index()))
            .cloned()
            .ok_or(CacheError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.handles.get().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
