//! Bootstrap Module Tests
//!
//! Drives the connection sequence with a scripted connector. Time is paused so
//! the one second retry delay elapses instantly.

#[cfg(test)]
mod tests {
    use crate::bootstrap::service::{Bootstrap, RETRY_DELAY};
    use crate::bootstrap::types::BootstrapState;
    use crate::error::CacheError;
    use crate::peer::client::{PeerClient, PeerConnector, PeerHandle};
    use crate::peer::pool::PeerConnectionPool;
    use crate::peer::protocol::GetDataResponse;
    use crate::registry::NodeRegistry;
    use crate::registry::types::{NodeAddress, NodeId};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct StubPeer(NodeId);

    #[async_trait]
    impl PeerClient for StubPeer {
        fn node_id(&self) -> NodeId {
            self.0
        }

        async fn get_data(&self, _key: &str) -> Result<GetDataResponse, CacheError> {
            Ok(GetDataResponse::not_found())
        }

        async fn set_data(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Ok(())
        }

        async fn set_index(&self, _key: &str, _owner: NodeId) -> Result<(), CacheError> {
            Ok(())
        }

        async fn delete_index(&self, _key: &str) -> Result<bool, CacheError> {
            Ok(false)
        }
    }

    /// Fails a configurable number of attempts per node (`None` = forever)
    /// and records each attempt with the pool state seen at that moment.
    struct ScriptedConnector {
        pool: Arc<PeerConnectionPool>,
        failures: Mutex<HashMap<NodeId, Option<usize>>>,
        attempts: Mutex<Vec<(NodeId, BootstrapState)>>,
    }

    impl ScriptedConnector {
        fn new(pool: Arc<PeerConnectionPool>, failures: Vec<(NodeId, Option<usize>)>) -> Self {
            Self {
                pool,
                failures: Mutex::new(failures.into_iter().collect()),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<(NodeId, BootstrapState)> {
            self.attempts.lock().unwrap().clone()
        }

        fn heal(&self, id: NodeId) {
            self.failures.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl PeerConnector for ScriptedConnector {
        async fn connect(&self, id: NodeId, _addr: &NodeAddress) -> Result<PeerHandle, CacheError> {
            self.attempts.lock().unwrap().push((id, self.pool.state()));

            let mut failures = self.failures.lock().unwrap();
            let fail = match failures.get_mut(&id) {
                Some(None) => true,
                Some(Some(0)) | None => false,
                Some(Some(remaining)) => {
                    *remaining -= 1;
                    true
                }
            };
            if fail {
                return Err(CacheError::Transport {
                    node: id,
                    reason: "connection refused".to_string(),
                });
            }
            Ok(Arc::new(StubPeer(id)))
        }
    }

    fn registry(n: usize) -> Arc<NodeRegistry> {
        let entries: Vec<String> = (0..n).map(|i| format!("127.0.0.1:{}", 50000 + i)).collect();
        Arc::new(NodeRegistry::from_entries(&entries).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_connects_in_order_and_becomes_ready() {
        let pool = Arc::new(PeerConnectionPool::new());
        let connector = Arc::new(ScriptedConnector::new(pool.clone(), vec![]));

        Bootstrap::new(NodeId(1), registry(3), pool.clone(), connector.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(
            connector.attempts(),
            vec![
                (NodeId(0), BootstrapState::Connecting(NodeId(0))),
                (NodeId(1), BootstrapState::Connecting(NodeId(1))),
                (NodeId(2), BootstrapState::Connecting(NodeId(2))),
            ]
        );
        assert_eq!(pool.state(), BootstrapState::Ready);
        assert_eq!(pool.len(), 3);
        let handle = pool.handle(NodeId(2), Duration::from_secs(1)).await.unwrap();
        assert_eq!(handle.node_id(), NodeId(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_same_node_with_fixed_delay() {
        let pool = Arc::new(PeerConnectionPool::new());
        let connector = Arc::new(ScriptedConnector::new(
            pool.clone(),
            vec![(NodeId(1), Some(3))],
        ));

        let started = tokio::time::Instant::now();
        Bootstrap::new(NodeId(0), registry(3), pool.clone(), connector.clone())
            .run()
            .await
            .unwrap();

        let order: Vec<NodeId> = connector.attempts().into_iter().map(|(id, _)| id).collect();
        assert_eq!(
            order,
            vec![NodeId(0), NodeId(1), NodeId(1), NodeId(1), NodeId(1), NodeId(2)]
        );
        let elapsed = started.elapsed();
        assert!(elapsed >= RETRY_DELAY * 3 && elapsed < RETRY_DELAY * 4);
        assert!(pool.state().is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_peer_blocks_ready() {
        let pool = Arc::new(PeerConnectionPool::new());
        let connector = Arc::new(ScriptedConnector::new(pool.clone(), vec![(NodeId(1), None)]));

        let outcome = tokio::time::timeout(
            Duration::from_secs(60),
            Bootstrap::new(NodeId(0), registry(3), pool.clone(), connector.clone()).run(),
        )
        .await;

        assert!(outcome.is_err(), "bootstrap must not finish while node 1 is down");
        assert_eq!(pool.state(), BootstrapState::Connecting(NodeId(1)));
        assert!(pool.is_empty());
        assert!(connector.attempts().iter().all(|(id, _)| *id != NodeId(2)));
        assert!(matches!(
            pool.handle(NodeId(0), Duration::from_secs(1)).await.err().unwrap(),
            CacheError::NotReady
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_outage_ends_and_bootstrap_completes() {
        let pool = Arc::new(PeerConnectionPool::new());
        let connector = Arc::new(ScriptedConnector::new(pool.clone(), vec![(NodeId(2), None)]));

        let task = tokio::spawn(
            Bootstrap::new(NodeId(0), registry(3), pool.clone(), connector.clone())
                .with_retry_delay(Duration::from_millis(200))
                .run(),
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(pool.state(), BootstrapState::Connecting(NodeId(2)));

        connector.heal(NodeId(2));
        task.await.unwrap().unwrap();

        assert_eq!(pool.state(), BootstrapState::Ready);
        let retries = connector
            .attempts()
            .iter()
            .filter(|(id, _)| *id == NodeId(2))
            .count();
        assert!(retries > 2, "expected repeated attempts, got {}", retries);
    }
}
