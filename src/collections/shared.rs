use super::hash_table::HashTable;
use crate::config::TableConfig;
use crate::error::Result;

use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to a [`HashTable`] behind a single mutex.
///
/// The table itself has no notion of concurrent callers; every operation here
/// takes the lock for its whole duration. Use [`with_mut`](Self::with_mut) to
/// run several operations under one acquisition.
pub struct SharedTable<V> {
    inner: Arc<Mutex<HashTable<V>>>,
}

impl<V> SharedTable<V> {
    pub fn new() -> Self {
        Self::from_table(HashTable::new())
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Ok(Self::from_table(HashTable::with_config(config)?))
    }

    pub fn from_table(table: HashTable<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    pub fn insert<K: Into<String>>(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    pub fn delete(&self, key: &str) -> Result<V> {
        self.inner.lock().delete(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&HashTable<V>) -> R,
    {
        let guard = self.inner.lock();
        f(&*guard)
    }

    pub fn with_mut<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashTable<V>) -> R,
    {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl<V: Clone> SharedTable<V> {
    /// Copies the value out so the lock is not held by the caller.
    pub fn read(&self, key: &str) -> Option<V> {
        self.inner.lock().read(key).cloned()
    }
}

impl<V> Clone for SharedTable<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> From<HashTable<V>> for SharedTable<V> {
    fn from(table: HashTable<V>) -> Self {
        Self::from_table(table)
    }
}

impl<V> Default for SharedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
