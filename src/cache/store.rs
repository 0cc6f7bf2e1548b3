use dashmap::DashMap;

use super::types::CacheEntry;
use crate::registry::types::NodeId;

/// Key to entry mapping owned by a single node process.
///
/// Peers never touch it directly; they go through the node's internal
/// endpoints, which call into these methods.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Inserts or replaces the entry as the authoritative value.
    pub fn set_owned(&self, key: String, value: String) {
        tracing::debug!("Set owned entry for key {}", key);
        self.entries.insert(key, CacheEntry::Owned(value));
    }

    /// Inserts or replaces the entry as a pointer to `owner`.
    pub fn set_indexed(&self, key: String, owner: NodeId) {
        tracing::debug!("Set index for key {} -> node {}", key, owner);
        self.entries.insert(key, CacheEntry::Indexed(owner));
    }

    /// Removes the entry, returning whether one existed.
    pub fn delete(&self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        tracing::debug!("Delete key {} (existed={})", key, existed);
        existed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
