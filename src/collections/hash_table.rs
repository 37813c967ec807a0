use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::*;

use derivative::Derivative;
use log::{debug, trace, warn};
use std::fmt;
use std::iter::FromIterator;

/// Sums the UTF-16 code units of `key`.
///
/// Collisions are expected and resolved by chaining, so this only has to be
/// deterministic. The empty key hashes to 0.
#[inline]
pub fn hash_key(key: &str) -> u64 {
    key.encode_utf16().map(u64::from).sum()
}

#[inline(always)]
fn index_for(key: &str, capacity: usize) -> usize {
    (hash_key(key) % capacity as u64) as usize
}

#[derive(Derivative)]
#[derivative(Debug(bound = "V: fmt::Debug"))]
struct Entry<V> {
    key: String,
    value: V,
    next: Option<EntryId>,
}

/// Maps string keys to values of type `V`.
///
/// Every bucket holds the head of a singly linked chain of entries that
/// share `hash_key(key) % capacity`. New keys are prepended to their chain.
/// Before an insert touches the table the current load factor is compared
/// against the configured maximum, and the bucket array doubles if it is
/// exceeded. The table never shrinks.
pub struct HashTable<V> {
    capacity: usize,
    count: usize,
    max_load_factor: f64,
    buckets: Vec<Option<EntryId>>,
    entries: Arena<Entry<V>>,
}

impl<V> HashTable<V> {
    /// Creates a table with the default eight buckets.
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    /// Creates a table with `capacity` buckets. Zero is rejected.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            warn!("Rejecting table configuration {:?}: {}", config, e);
            return Err(e);
        }

        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        Self {
            capacity: config.initial_capacity,
            count: 0,
            max_load_factor: config.max_load_factor,
            buckets: vec![None; config.initial_capacity],
            entries: Arena::with_capacity(config.initial_capacity),
        }
    }

    /// Number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity as f64
    }

    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// The bucket `key` lives in at the current capacity.
    #[inline]
    pub fn bucket_index(&self, key: &str) -> usize {
        index_for(key, self.capacity)
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) {
        self.replace(key, value);
    }

    /// Like [`insert`](Self::insert), but hands back the overwritten value.
    pub fn replace<K: Into<String>>(&mut self, key: K, value: V) -> Option<V> {
        // Checked against the state before this insert lands.
        if self.load_factor() > self.max_load_factor {
            self.resize();
        }

        let key = key.into();

        if let Some(id) = self.find(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                trace!("Overwriting value for `{}`", key);
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        trace!("Inserting `{}` into bucket {}", key, self.bucket_index(&key));
        self.link(key, value);
        None
    }

    pub fn read(&self, key: &str) -> Option<&V> {
        self.find(key)
            .and_then(|id| self.entries.get(id))
            .map(|entry| &entry.value)
    }

    pub fn read_mut(&mut self, key: &str) -> Option<&mut V> {
        let id = self.find(key)?;
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks `key` and returns its value, or `TableError::NotFound`.
    pub fn delete(&mut self, key: &str) -> Result<V> {
        let index = self.bucket_index(key);

        let mut prev: Option<EntryId> = None;
        let mut cursor = self.buckets[index];

        while let Some(id) = cursor {
            let (is_match, next) = match self.entries.get(id) {
                Some(entry) => (entry.key == key, entry.next),
                None => break,
            };

            if is_match {
                let entry = match self.entries.free(id) {
                    Ok(entry) => entry,
                    Err(_) => break,
                };

                match prev {
                    Some(p) => {
                        if let Some(prev_entry) = self.entries.get_mut(p) {
                            prev_entry.next = entry.next;
                        }
                    }
                    None => self.buckets[index] = entry.next,
                }
                self.count -= 1;

                trace!("Deleted `{}` from bucket {}", key, index);
                return Ok(entry.value);
            }

            prev = cursor;
            cursor = next;
        }

        Err(TableError::NotFound {
            key: key.to_string(),
        })
    }

    /// Removes every entry. The capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.entries.reset();
        self.count = 0;
    }

    /// Visits every entry bucket by bucket. The order carries no meaning.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            bucket: 0,
            cursor: None,
            remaining: self.count,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    fn find(&self, key: &str) -> Option<EntryId> {
        let mut cursor = self.buckets[self.bucket_index(key)];

        while let Some(id) = cursor {
            let entry = self.entries.get(id)?;
            if entry.key == key {
                return Some(id);
            }
            cursor = entry.next;
        }

        None
    }

    /// Allocates a new entry at the head of its chain.
    fn link(&mut self, key: String, value: V) {
        let index = self.bucket_index(&key);
        let next = self.buckets[index];

        let id = self.entries.alloc(Entry { key, value, next });
        self.buckets[index] = Some(id);
        self.count += 1;
    }

    /// Doubles the bucket array and re-places every entry.
    ///
    /// Old buckets are walked in index order, each chain head to tail, and
    /// every entry is prepended to its new chain, exactly as a fresh insert
    /// would place it. Entries keep their arena slots.
    fn resize(&mut self) {
        let old_capacity = self.capacity;
        let new_capacity = old_capacity * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, vec![None; new_capacity]);

        self.capacity = new_capacity;
        self.count = 0;

        for head in old_buckets {
            let mut cursor = head;

            while let Some(id) = cursor {
                let entry = match self.entries.get_mut(id) {
                    Some(entry) => entry,
                    None => break,
                };
                cursor = entry.next;

                let index = index_for(&entry.key, new_capacity);
                entry.next = self.buckets[index];
                self.buckets[index] = Some(id);
                self.count += 1;
            }
        }

        debug!(
            "Resized table from {} to {} buckets ({} entries)",
            old_capacity, new_capacity, self.count
        );
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for HashTable<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    bucket: usize,
    cursor: Option<EntryId>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let table = self.table;

        loop {
            if let Some(entry) = self.cursor.take().and_then(|id| table.entries.get(id)) {
                self.cursor = entry.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key.as_str(), &entry.value));
            }

            self.cursor = *table.buckets.get(self.bucket)?;
            self.bucket += 1;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}
