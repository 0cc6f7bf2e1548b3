//! Process configuration of a cache node.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use crate::bootstrap::service::RETRY_DELAY;
use crate::coordination::service::CALL_TIMEOUT;
use crate::error::CacheError;
use crate::registry::NodeRegistry;
use crate::registry::types::NodeId;

/// First client port; node `i` listens on `DEFAULT_CLIENT_BASE_PORT + i`.
pub const DEFAULT_CLIENT_BASE_PORT: u16 = 9527;
pub const DEFAULT_CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Peer endpoints of the default three-node deployment.
pub const DEFAULT_PEERS: [&str; 3] = ["server1:50000", "server2:50001", "server3:50002"];

/// Everything a node needs to start.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub local: NodeId,
    pub registry: Arc<NodeRegistry>,
    pub client_addr: SocketAddr,
    pub call_timeout: Duration,
    pub retry_delay: Duration,
}

impl NodeConfig {
    pub fn new(
        local: NodeId,
        registry: Arc<NodeRegistry>,
        client_addr: SocketAddr,
    ) -> Result<Self, CacheError> {
        if !registry.contains(local) {
            return Err(CacheError::InvalidConfig(format!(
                "node id {} is outside the {}-node cluster",
                local,
                registry.len()
            )));
        }
        Ok(Self {
            local,
            registry,
            client_addr,
            call_timeout: CALL_TIMEOUT,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Replaces the peer call timeout and the bootstrap retry delay.
    ///
    /// A zero call timeout would fail every peer call before it is sent.
    pub fn with_timeouts(
        mut self,
        call_timeout: Duration,
        retry_delay: Duration,
    ) -> Result<Self, CacheError> {
        if call_timeout.is_zero() {
            return Err(CacheError::InvalidConfig(
                "the peer call timeout must be greater than zero".to_string(),
            ));
        }
        self.call_timeout = call_timeout;
        self.retry_delay = retry_delay;
        Ok(self)
    }

    /// Client address derived from a base port and the node index.
    pub fn client_addr_for(
        ip: IpAddr,
        base_port: u16,
        local: NodeId,
    ) -> Result<SocketAddr, CacheError> {
        let port = u16::try_from(local.0)
            .ok()
            .and_then(|offset| base_port.checked_add(offset))
            .ok_or_else(|| {
                CacheError::InvalidConfig(format!(
                    "client port {} + {} overflows",
                    base_port, local
                ))
            })?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Address the peer listener binds: this node's own registry entry.
    pub fn peer_bind_addr(&self) -> Result<String, CacheError> {
        Ok(self.registry.address(self.local)?.to_string())
    }
}
