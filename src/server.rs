//! Node wiring: listeners, routers and the bootstrap task.
//!
//! Each node serves two independent entry points, one for clients and one for
//! peers, and runs the bootstrap sequence next to them. All three share the
//! node's [`CacheStore`] and [`PeerConnectionPool`].

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::bootstrap::service::Bootstrap;
use crate::cache::store::CacheStore;
use crate::config::NodeConfig;
use crate::coordination::{handlers as client_handlers, service::CoordinationService};
use crate::error::CacheError;
use crate::peer::client::HttpConnector;
use crate::peer::handlers as peer_handlers;
use crate::peer::pool::PeerConnectionPool;

/// Binds the peer and client listeners. Failure here is fatal for the node.
pub async fn bind_listeners(config: &NodeConfig) -> Result<(TcpListener, TcpListener), CacheError> {
    let peer_addr = config.peer_bind_addr()?;
    let peer_listener = TcpListener::bind(&peer_addr)
        .await
        .map_err(|source| CacheError::Bind {
            addr: peer_addr.clone(),
            source,
        })?;

    let client_listener = TcpListener::bind(config.client_addr)
        .await
        .map_err(|source| CacheError::Bind {
            addr: config.client_addr.to_string(),
            source,
        })?;

    Ok((peer_listener, client_listener))
}

/// A started node and the tasks serving it.
pub struct RunningNode {
    pub coordinator: Arc<CoordinationService>,
    client_addr: SocketAddr,
    peer_server: JoinHandle<std::io::Result<()>>,
    client_server: JoinHandle<std::io::Result<()>>,
    bootstrap: JoinHandle<Result<(), CacheError>>,
}

impl RunningNode {
    pub fn client_addr(&self) -> SocketAddr {
        self.client_addr
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.coordinator.store()
    }

    pub fn pool(&self) -> &Arc<PeerConnectionPool> {
        self.coordinator.pool()
    }

    /// Runs until one of the listeners stops.
    pub async fn serve(self) -> Result<()> {
        let local = self.coordinator.local_node_id();
        let bootstrap = self.bootstrap;
        tokio::spawn(async move {
            match bootstrap.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Bootstrap of node {} failed: {}", local, e),
                Err(e) => tracing::error!("Bootstrap task of node {} stopped: {}", local, e),
            }
        });

        tokio::select! {
            result = self.peer_server => {
                result.context("peer server task failed")?.context("peer server stopped")?;
            }
            result = self.client_server => {
                result.context("client server task failed")?.context("client server stopped")?;
            }
        }

        anyhow::bail!("node {} listener exited", local)
    }
}

/// Starts a node on already-bound listeners.
///
/// The listeners serve immediately; bootstrap runs in the background and the
/// client API waits for it wherever peers are needed.
pub async fn start(
    config: NodeConfig,
    peer_listener: TcpListener,
    client_listener: TcpListener,
) -> Result<RunningNode> {
    let local = config.local;
    let store = Arc::new(CacheStore::new());
    let pool = Arc::new(PeerConnectionPool::new());
    let coordinator = Arc::new(
        CoordinationService::new(local, config.registry.clone(), store.clone(), pool.clone())
            .with_call_timeout(config.call_timeout),
    );

    let peer_addr = peer_listener
        .local_addr()
        .context("peer listener has no local address")?;
    let client_addr = client_listener
        .local_addr()
        .context("client listener has no local address")?;

    let peer_app = peer_handlers::router(local, store);
    tracing::info!("Start peer server, node:{} addr:{}", local, peer_addr);
    let peer_server = tokio::spawn(async move { axum::serve(peer_listener, peer_app).await });

    let client_app = client_handlers::router(coordinator.clone());
    tracing::info!("Start client server, node:{} addr:{}", local, client_addr);
    let client_server = tokio::spawn(async move { axum::serve(client_listener, client_app).await });

    let connector = Arc::new(HttpConnector::new(config.call_timeout));
    let bootstrap = Bootstrap::new(local, config.registry.clone(), pool, connector)
        .with_retry_delay(config.retry_delay);
    let bootstrap = tokio::spawn(bootstrap.run());

    Ok(RunningNode {
        coordinator,
        client_addr,
        peer_server,
        client_server,
        bootstrap,
    })
}

/// Binds, starts and serves a node until a listener fails.
pub async fn run(config: NodeConfig) -> Result<()> {
    let (peer_listener, client_listener) = bind_listeners(&config).await?;
    let node = start(config, peer_listener, client_listener).await?;
    node.serve().await
}
