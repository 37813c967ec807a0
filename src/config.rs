use crate::error::{Result, TableError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Construction parameters for a [`HashTable`](crate::HashTable).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Number of buckets the table starts with.
    pub initial_capacity: usize,
    /// The table grows before an insert once `count / capacity` exceeds this.
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidConfiguration(
                "initial capacity must be positive".to_string(),
            ));
        }

        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(TableError::InvalidConfiguration(format!(
                "max load factor must be a finite positive number, got {}",
                self.max_load_factor
            )));
        }

        Ok(())
    }
}
