use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

/// Index of a node in the static cluster table, in `[0, N)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Peer endpoint of a node. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}

impl NodeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Base URL used by peers to reach this node's internal endpoints.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeAddress {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((host, port)) = s.trim().rsplit_once(':') else {
            return Err(CacheError::InvalidConfig(format!(
                "invalid node address '{s}', expected host:port"
            )));
        };
        if host.is_empty() {
            return Err(CacheError::InvalidConfig(format!(
                "missing host in node address '{s}'"
            )));
        }
        let port = port.parse().map_err(|_| {
            CacheError::InvalidConfig(format!("invalid port in node address '{s}'"))
        })?;
        Ok(Self::new(host, port))
    }
}
