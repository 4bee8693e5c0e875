//! Table construction settings

use crate::error::TableError;
use crate::DEFAULT_CAPACITY;

/// Construction settings for a [`HashTable`](crate::HashTable).
///
/// ```
/// use probe_table::{HashTable, TableConfig};
///
/// let mut cfg = TableConfig::default();
/// cfg.capacity(64).compact_threshold(0.5);
///
/// let table: HashTable<&str, i32> = HashTable::from_config(&cfg).unwrap();
/// assert_eq!(table.capacity(), 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub(crate) capacity: usize,
    pub(crate) compact_threshold: Option<f64>,
}

impl TableConfig {
    /// Creates a config with the default capacity and no automatic compaction.
    pub fn new() -> TableConfig {
        TableConfig {
            capacity: DEFAULT_CAPACITY,
            compact_threshold: None,
        }
    }

    /// Choose the number of slots. The table never grows past it.
    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        &mut *self
    }

    /// Compact before inserting once tombstones make up at least `ratio`
    /// of the slots. Values outside `(0, 1]` are rejected by `validate`.
    pub fn compact_threshold(&mut self, ratio: f64) -> &mut Self {
        self.compact_threshold = Some(ratio);
        &mut *self
    }

    /// Disable automatic compaction.
    pub fn no_compaction(&mut self) -> &mut Self {
        self.compact_threshold = None;
        &mut *self
    }

    /// Configured number of slots
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    /// Configured compaction ratio, if any
    pub fn get_compact_threshold(&self) -> Option<f64> {
        self.compact_threshold
    }

    /// Checks that the settings describe a usable table.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.capacity == 0 {
            return Err(TableError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        if let Some(ratio) = self.compact_threshold {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(TableError::InvalidThreshold);
            }
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.get_capacity(), DEFAULT_CAPACITY);
        assert_eq!(cfg.get_compact_threshold(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_chaining() {
        let mut cfg = TableConfig::new();
        cfg.capacity(16).compact_threshold(0.25);
        assert_eq!(cfg.get_capacity(), 16);
        assert_eq!(cfg.get_compact_threshold(), Some(0.25));

        cfg.no_compaction();
        assert_eq!(cfg.get_compact_threshold(), None);
    }

    #[test]
    fn test_validate() {
        let mut cfg = TableConfig::new();
        cfg.capacity(0);
        assert_eq!(
            cfg.validate(),
            Err(TableError::InvalidCapacity { capacity: 0 })
        );

        cfg.capacity(8).compact_threshold(0.0);
        assert_eq!(cfg.validate(), Err(TableError::InvalidThreshold));
        cfg.compact_threshold(1.5);
        assert_eq!(cfg.validate(), Err(TableError::InvalidThreshold));
        cfg.compact_threshold(f64::NAN);
        assert_eq!(cfg.validate(), Err(TableError::InvalidThreshold));
        cfg.compact_threshold(1.0);
        assert!(cfg.validate().is_ok());
    }
}
