//! A string-keyed hash table using separate chaining.
//!
//! Chains are linked through an [`Arena`] of entries addressed by [`EntryId`]
//! rather than through boxed nodes, so unlinking and relinking an entry never
//! moves its key or value.

use derivative::Derivative;
use thiserror::Error;

pub mod collections;
pub mod config;
pub mod error;
pub mod logger;
pub mod problems;

pub use collections::hash_table::{hash_key, HashTable};
pub use collections::shared::SharedTable;
pub use config::TableConfig;
pub use error::TableError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("slot {0} is out of bounds")]
    OutOfBounds(usize),
    #[error("slot {0} is vacant")]
    Vacant(usize),
}

/// Handle to a value living in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Slot storage with a free list. Freed slots are handed out again by the
/// next allocation, so ids are only meaningful while their value is alive.
#[derive(Derivative)]
#[derivative(Debug(bound = "T: std::fmt::Debug"), Default(bound = ""))]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn with_capacity(size: usize) -> Self {
        Self {
            slots: Vec::with_capacity(size),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn alloc(&mut self, value: T) -> EntryId {
        self.alloc_with(|| value)
    }

    #[inline(always)]
    pub fn alloc_with<F>(&mut self, f: F) -> EntryId
    where
        F: FnOnce() -> T,
    {
        self.live += 1;

        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].is_none());
                self.slots[index] = Some(f());
                EntryId(index)
            }
            None => {
                self.slots.push(Some(f()));
                EntryId(self.slots.len() - 1)
            }
        }
    }

    #[inline]
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn free(&mut self, id: EntryId) -> Result<T, ArenaError> {
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(ArenaError::OutOfBounds(id.0))?;
        let value = slot.take().ok_or(ArenaError::Vacant(id.0))?;

        self.free.push(id.0);
        self.live -= 1;

        Ok(value)
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every value but keeps the slot allocation.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (EntryId(i), v)))
    }
}
