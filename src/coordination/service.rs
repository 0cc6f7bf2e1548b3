use std::sync::Arc;
use std::time::Duration;

use crate::cache::store::CacheStore;
use crate::cache::types::CacheEntry;
use crate::error::CacheError;
use crate::peer::pool::PeerConnectionPool;
use crate::registry::NodeRegistry;
use crate::registry::types::NodeId;

/// Upper bound for every outbound peer call.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a completed delete sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    /// Nodes that held an entry for the key, in sweep order.
    pub existed_on: Vec<NodeId>,
}

impl DeleteReport {
    pub fn existed(&self) -> bool {
        !self.existed_on.is_empty()
    }
}

/// Node-local context for the coordination protocol.
///
/// Built once at startup and shared by the client handlers.
pub struct CoordinationService {
    local: NodeId,
    registry: Arc<NodeRegistry>,
    store: Arc<CacheStore>,
    pool: Arc<PeerConnectionPool>,
    call_timeout: Duration,
}

impl CoordinationService {
    pub fn new(
        local: NodeId,
        registry: Arc<NodeRegistry>,
        store: Arc<CacheStore>,
        pool: Arc<PeerConnectionPool>,
    ) -> Self {
        Self {
            local,
            registry,
            store,
            pool,
            call_timeout: CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn local_node_id(&self) -> NodeId {
        self.local
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    pub fn pool(&self) -> &Arc<PeerConnectionPool> {
        &self.pool
    }

    /// Returns `Ok(None)` when no node has the key.
    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.store.get(key) {
            None => Ok(None),
            Some(CacheEntry::Owned(value)) => Ok(Some(value)),
            Some(CacheEntry::Indexed(owner)) => self.redirect_get(key, owner).await.map(Some),
        }
    }

    async fn redirect_get(&self, key: &str, owner: NodeId) -> Result<String, CacheError> {
        let dangling = || CacheError::DanglingIndex {
            key: key.to_string(),
            owner,
        };
        if owner == self.local {
            return Err(dangling());
        }

        let peer = self.pool.handle(owner, self.call_timeout).await?;
        let response = peer.get_data(key).await.inspect_err(|e| {
            tracing::warn!(
                "Redirect get failed, local:{} owner:{} key:{}: {}",
                self.local,
                owner,
                key,
                e
            );
        })?;

        match response {
            rsp if rsp.found && rsp.owner.is_none() => Ok(rsp.value),
            rsp => {
                tracing::warn!(
                    "Owner {} has no value for key {} (found={}, owner={:?})",
                    owner,
                    key,
                    rsp.found,
                    rsp.owner
                );
                Err(dangling())
            }
        }
    }

    /// Makes this node the owner of `key` and indexes it on every other node.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.pool.wait_ready(self.call_timeout).await?;

        for id in self.registry.ids() {
            if let Err(e) = self.put_on(id, key, value).await {
                tracing::warn!(
                    "Put sweep aborted, local:{} remote:{} key:{}: {}",
                    self.local,
                    id,
                    key,
                    e
                );
                return Err(e);
            }
        }

        tracing::debug!("Put key {} owned by node {}", key, self.local);
        Ok(())
    }

    async fn put_on(&self, id: NodeId, key: &str, value: &str) -> Result<(), CacheError> {
        if id == self.local {
            self.store.set_owned(key.to_string(), value.to_string());
            return Ok(());
        }
        let peer = self.pool.handle(id, self.call_timeout).await?;
        peer.set_index(key, self.local).await
    }

    /// Removes `key` from every node.
    pub async fn delete(&self, key: &str) -> Result<DeleteReport, CacheError> {
        self.pool.wait_ready(self.call_timeout).await?;

        let mut existed_on = Vec::new();
        for id in self.registry.ids() {
            match self.delete_on(id, key).await {
                Ok(true) => existed_on.push(id),
                Ok(false) => {
                    tracing::debug!("Node {} had no entry for key {}", id, key);
                }
                Err(e) => {
                    tracing::warn!(
                        "Delete sweep aborted, local:{} remote:{} key:{}: {}",
                        self.local,
                        id,
                        key,
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(DeleteReport { existed_on })
    }

    async fn delete_on(&self, id: NodeId, key: &str) -> Result<bool, CacheError> {
        if id == self.local {
            return Ok(self.store.delete(key));
        }
        let peer = self.pool.handle(id, self.call_timeout).await?;
        peer.delete_index(key).await
    }
}
