//! Key roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a property within a primary or secondary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyType {
    /// Partition key.
    #[serde(rename = "HASH")]
    Hash,
    /// Sort key.
    #[serde(rename = "RANGE")]
    Range,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Hash => write!(f, "HASH"),
            KeyType::Range => write!(f, "RANGE"),
        }
    }
}

/// A property's role in the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Partition or sort key.
    pub key_type: KeyType,
    /// Whether values are generated rather than supplied by the caller.
    pub uuid: bool,
}

impl KeyDescriptor {
    /// Create a partition key descriptor.
    pub fn hash() -> Self {
        Self {
            key_type: KeyType::Hash,
            uuid: false,
        }
    }

    /// Create a sort key descriptor.
    pub fn range() -> Self {
        Self {
            key_type: KeyType::Range,
            uuid: false,
        }
    }

    /// Mark values as generated.
    pub fn with_uuid(mut self) -> Self {
        self.uuid = true;
        self
    }
}
