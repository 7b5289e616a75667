use std::fmt;

use crate::slot::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table needs at least one slot.
    InvalidCapacity,
    /// No open slot along the key's probe sequence. The table is unchanged.
    TableFull { key: Key },
    /// The key isn't stored. A normal negative answer, not a failure.
    NotFound { key: Key },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidCapacity => write!(f, "Table capacity must be positive"),
            TableError::TableFull { key } => write!(f, "Table is full, could not insert {key}"),
            TableError::NotFound { key } => write!(f, "Key {key} not found"),
        }
    }
}

impl std::error::Error for TableError {}
