//! In-memory registries for the catalog collaborators.

use std::sync::{Arc, RwLock};

use stockbook_catalog::Article;
use stockbook_core::{ArticleId, SupplierId};
use stockbook_suppliers::Supplier;

/// Key/value registry abstraction for catalog-style records.
pub trait Registry<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    /// Remove a record; `false` when the key was absent.
    fn remove(&self, key: &K) -> bool;
    fn list(&self) -> Vec<V>;
}

impl<K, V, S> Registry<K, V> for Arc<S>
where
    S: Registry<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> bool {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory registry preserving insertion order (new keys go last,
/// upserts keep their slot).
#[derive(Debug)]
pub struct InMemoryRegistry<K, V> {
    inner: RwLock<Vec<(K, V)>>,
}

impl<K, V> InMemoryRegistry<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<K, V> Default for InMemoryRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Registry<K, V> for InMemoryRegistry<K, V>
where
    K: Clone + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let entries = self.inner.read().ok()?;
        entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.inner.write() {
            match entries.iter().position(|(k, _)| *k == key) {
                Some(pos) => entries[pos].1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    fn remove(&self, key: &K) -> bool {
        match self.inner.write() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|(k, _)| k != key);
                entries.len() != before
            }
            Err(_) => false,
        }
    }

    fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(entries) => entries.iter().map(|(_, v)| v.clone()).collect(),
            Err(_) => vec![],
        }
    }
}

pub type ArticleRegistry = InMemoryRegistry<ArticleId, Article>;
pub type SupplierRegistry = InMemoryRegistry<SupplierId, Supplier>;
