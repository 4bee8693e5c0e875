//! Error types

use core::fmt;

/// Typed errors for table construction and insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A capacity of zero was supplied where a positive bucket count is required
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },
    /// The probe cycle was exhausted without finding an empty slot, a tombstone, or the key
    TableFull {
        /// Slot count of the full table
        capacity: usize,
    },
    /// A compaction ratio outside `(0, 1]` was configured
    InvalidThreshold,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity {}: capacity must be positive", capacity)
            }
            TableError::TableFull { capacity } => {
                write!(
                    f,
                    "Table full: all {} slots hold live keys, no insertion point",
                    capacity
                )
            }
            TableError::InvalidThreshold => {
                write!(f, "Invalid compaction threshold: ratio must be in (0, 1]")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}
