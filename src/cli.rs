use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_CLIENT_BASE_PORT, DEFAULT_CLIENT_IP, DEFAULT_PEERS, NodeConfig};
use crate::error::CacheError;
use crate::registry::NodeRegistry;
use crate::registry::types::NodeId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one node of the distributed cache cluster")]
pub struct Cli {
    /// Index of this node in the peer table.
    pub node_id: u32,

    /// Peer endpoints of every node, in node id order (host:port).
    #[arg(long = "peer", value_delimiter = ',', default_values_t = default_peers())]
    pub peers: Vec<String>,

    /// Address the client listener binds to.
    #[arg(long, default_value_t = DEFAULT_CLIENT_IP)]
    pub client_ip: IpAddr,

    /// Client port of node 0; node i listens on base + i.
    #[arg(long, default_value_t = DEFAULT_CLIENT_BASE_PORT)]
    pub client_base_port: u16,

    /// Timeout for every outbound peer call, in seconds.
    #[arg(long, default_value_t = 10)]
    pub call_timeout_secs: u64,

    /// Delay between bootstrap connection attempts, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,
}

fn default_peers() -> Vec<String> {
    DEFAULT_PEERS.iter().map(|peer| peer.to_string()).collect()
}

impl Cli {
    pub fn into_config(self) -> Result<NodeConfig, CacheError> {
        let local = NodeId(self.node_id);
        let registry = Arc::new(NodeRegistry::from_entries(&self.peers)?);
        let client_addr =
            NodeConfig::client_addr_for(self.client_ip, self.client_base_port, local)?;

        NodeConfig::new(local, registry, client_addr)?.with_timeouts(
            Duration::from_secs(self.call_timeout_secs),
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}
