//! The persistence abstraction the facade's components sit behind.
//!
//! `spec.md` §6 describes three logical key-value stores (`agents`,
//! `escrows`, `shares`) backed by "any implementation ... atomic
//! read-modify-write per key and iteration under a consistent snapshot."
//! Component crates (`agentic-registry`, `agentic-escrow`, `agentic-revenue`)
//! already provide that guarantee internally via their own `RwLock`-guarded
//! maps; this trait exists so a deployment can swap in a persistent backend
//! for the facade's own bookkeeping (e.g. the Directory's cross-chain
//! record store) without touching component logic — the same "injected
//! capability over hardwired backend" pattern used for the NFT and
//! transfer gateways.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

/// An atomic, async key-value store.
#[async_trait::async_trait]
pub trait Store<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Send + Sync,
{
    /// Reads the value stored at `key`, if any.
    async fn get(&self, key: &K) -> Option<V>;

    /// Writes `value` at `key`, returning the previous value if one existed.
    async fn put(&self, key: K, value: V) -> Option<V>;

    /// Removes the value at `key`, returning it if one existed.
    async fn remove(&self, key: &K) -> Option<V>;

    /// Returns a consistent snapshot of all stored values.
    async fn snapshot(&self) -> Vec<V>
    where
        V: Clone;
}

/// An in-memory [`Store`] backed by a single `RwLock<HashMap<_, _>>`.
pub struct InMemoryStore<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }
}

impl<K, V> InMemoryStore<K, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Eq + Hash + Send + Sync + Clone,
    V: Send + Sync + Clone,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: K, value: V) -> Option<V> {
        self.entries.write().await.insert(key, value)
    }

    async fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().await.remove(key)
    }

    async fn snapshot(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let store: InMemoryStore<String, u32> = InMemoryStore::new();
        let previous = store.put("a".to_string(), 1).await;
        assert_eq!(previous, None);
        assert_eq!(store.get(&"a".to_string()).await, Some(1));
    }

    #[tokio::test]
    async fn remove_returns_the_removed_value() {
        let store: InMemoryStore<String, u32> = InMemoryStore::new();
        store.put("a".to_string(), 1).await;
        assert_eq!(store.remove(&"a".to_string()).await, Some(1));
        assert_eq!(store.get(&"a".to_string()).await, None);
    }

    #[tokio::test]
    async fn snapshot_reflects_all_current_entries() {
        let store: InMemoryStore<String, u32> = InMemoryStore::new();
        store.put("a".to_string(), 1).await;
        store.put("b".to_string(), 2).await;
        let mut values = store.snapshot().await;
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
    }
}
