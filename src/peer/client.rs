use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::protocol::*;
use crate::error::CacheError;
use crate::registry::types::{NodeAddress, NodeId};

/// Remote-call interface of a single peer.
#[async_trait]
pub trait PeerClient: Send + Sync {
    /// The node this handle talks to.
    fn node_id(&self) -> NodeId;

    async fn get_data(&self, key: &str) -> Result<GetDataResponse, CacheError>;

    async fn set_data(&self, key: &str, value: &str) -> Result<(), CacheError>;

    async fn set_index(&self, key: &str, owner: NodeId) -> Result<(), CacheError>;

    /// Returns whether the peer held an entry for `key`.
    async fn delete_index(&self, key: &str) -> Result<bool, CacheError>;
}

/// A live connection to one peer, shared by every call made to it.
pub type PeerHandle = Arc<dyn PeerClient>;

/// Establishes peer handles during bootstrap.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(&self, id: NodeId, addr: &NodeAddress) -> Result<PeerHandle, CacheError>;
}

/// HTTP implementation of [`PeerClient`].
pub struct HttpPeer {
    node: NodeId,
    base_url: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpPeer {
    pub fn new(
        node: NodeId,
        addr: &NodeAddress,
        http_client: reqwest::Client,
        timeout: Duration,
    ) -> Self {
        Self {
            node,
            base_url: addr.base_url(),
            http_client,
            timeout,
        }
    }

    fn transport(&self, err: reqwest::Error) -> CacheError {
        CacheError::Transport {
            node: self.node,
            reason: err.to_string(),
        }
    }

    async fn post<Req, Resp>(&self, endpoint: &str, payload: &Req) -> Result<Resp, CacheError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, endpoint))
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        if !response.status().is_success() {
            return Err(CacheError::Rejected {
                node: self.node,
                status: response.status().as_u16(),
            });
        }

        response.json::<Resp>().await.map_err(|e| self.transport(e))
    }

    fn check_ack(&self, ack: AckResponse) -> Result<(), CacheError> {
        if ack.success {
            Ok(())
        } else {
            Err(CacheError::Rejected {
                node: self.node,
                status: reqwest::StatusCode::OK.as_u16(),
            })
        }
    }
}

#[async_trait]
impl PeerClient for HttpPeer {
    fn node_id(&self) -> NodeId {
        self.node
    }

    async fn get_data(&self, key: &str) -> Result<GetDataResponse, CacheError> {
        let payload = GetDataRequest {
            key: key.to_string(),
        };
        self.post(ENDPOINT_GET_DATA, &payload).await
    }

    async fn set_data(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let payload = SetDataRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        let ack: AckResponse = self.post(ENDPOINT_SET_DATA, &payload).await?;
        self.check_ack(ack)
    }

    async fn set_index(&self, key: &str, owner: NodeId) -> Result<(), CacheError> {
        let payload = SetIndexRequest {
            key: key.to_string(),
            owner,
        };
        let ack: AckResponse = self.post(ENDPOINT_SET_INDEX, &payload).await?;
        self.check_ack(ack)
    }

    async fn delete_index(&self, key: &str) -> Result<bool, CacheError> {
        let payload = DeleteIndexRequest {
            key: key.to_string(),
        };
        let response: DeleteIndexResponse = self.post(ENDPOINT_DELETE_INDEX, &payload).await?;
        Ok(response.existed)
    }
}

/// Connects by probing the peer's ping endpoint; a peer that answers with the
/// expected node id gets a handle sharing this connector's HTTP client.
pub struct HttpConnector {
    http_client: reqwest::Client,
    call_timeout: Duration,
}

impl HttpConnector {
    pub fn new(call_timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            call_timeout,
        }
    }
}

#[async_trait]
impl PeerConnector for HttpConnector {
    async fn connect(&self, id: NodeId, addr: &NodeAddress) -> Result<PeerHandle, CacheError> {
        let transport = |reason: String| CacheError::Transport { node: id, reason };

        let response = self
            .http_client
            .get(format!("{}{}", addr.base_url(), ENDPOINT_PING))
            .timeout(self.call_timeout)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CacheError::Rejected {
                node: id,
                status: response.status().as_u16(),
            });
        }

        let ping: PingResponse = response
            .json()
            .await
            .map_err(|e| transport(e.to_string()))?;
        if ping.node != id {
            return Err(transport(format!(
                "{} answered as node {}",
                addr, ping.node
            )));
        }

        Ok(Arc::new(HttpPeer::new(
            id,
            addr,
            self.http_client.clone(),
            self.call_timeout,
        )))
    }
}
