use std::sync::Arc;
use std::time::Duration;

use super::types::BootstrapState;
use crate::error::CacheError;
use crate::peer::client::{PeerConnector, PeerHandle};
use crate::peer::pool::PeerConnectionPool;
use crate::registry::NodeRegistry;
use crate::registry::types::NodeId;

/// Fixed delay between two connection attempts to the same node.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct Bootstrap {
    local: NodeId,
    registry: Arc<NodeRegistry>,
    pool: Arc<PeerConnectionPool>,
    connector: Arc<dyn PeerConnector>,
    retry_delay: Duration,
}

impl Bootstrap {
    pub fn new(
        local: NodeId,
        registry: Arc<NodeRegistry>,
        pool: Arc<PeerConnectionPool>,
        connector: Arc<dyn PeerConnector>,
    ) -> Self {
        Self {
            local,
            registry,
            pool,
            connector,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Connects to every node in id order and installs the handles.
    ///
    /// Does not return until every node has answered.
    pub async fn run(self) -> Result<(), CacheError> {
        let mut handles: Vec<PeerHandle> = Vec::with_capacity(self.registry.len());

        for (id, addr) in self.registry.iter() {
            self.pool.advance(BootstrapState::Connecting(id));
            let mut attempts: u64 = 0;

            let handle = loop {
                attempts += 1;
                match self.connector.connect(id, addr).await {
                    Ok(handle) => break handle,
                    Err(e) => {
                        tracing::warn!(
                            "Connect to peer failed, local:{} node:{} addr:{} attempt:{}: {}",
                            self.local,
                            id,
                            addr,
                            attempts,
                            e
                        );
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            };

            tracing::info!(
                "Connected to peer, local:{} node:{} addr:{}",
                self.local,
                id,
                addr
            );
            handles.push(handle);
        }

        self.pool.install(handles)?;
        tracing::info!(
            "Node {} ready, {} peer connections established",
            self.local,
            self.registry.len()
        );
        Ok(())
    }
}
