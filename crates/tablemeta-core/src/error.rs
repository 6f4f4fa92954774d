//! Core error types.

use crate::metadata::{IndexKind, KeyType, ModelId};
use thiserror::Error;

/// Metadata construction and lookup errors.
///
/// Every variant describes a configuration defect. None of them are
/// transient, so callers should surface them rather than retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Two properties claim the same role for one secondary index.
    #[error(
        "{kind} index `{index}` on {model}: {role} key claimed by both `{existing}` and `{conflicting}`"
    )]
    IndexConflict {
        /// Model declaring the index.
        model: ModelId,
        /// Global or local.
        kind: IndexKind,
        /// Index name.
        index: String,
        /// The contested role.
        role: KeyType,
        /// Property that claimed the role first.
        existing: String,
        /// Property that claimed it second.
        conflicting: String,
    },

    /// An index has a sort key but nothing supplies its partition key.
    #[error("{kind} index `{index}` on {model} has no partition key")]
    IncompleteIndex {
        /// Model declaring the index.
        model: ModelId,
        /// Global or local.
        kind: IndexKind,
        /// Index name.
        index: String,
    },

    /// The model declares no partition key.
    #[error("model {model} has no partition key")]
    MissingPartitionKey {
        /// The offending model.
        model: ModelId,
    },

    /// More than one property claims the table's partition or sort key.
    #[error("model {model}: {role} key claimed by both `{existing}` and `{conflicting}`")]
    KeyConflict {
        /// The offending model.
        model: ModelId,
        /// The contested role.
        role: KeyType,
        /// Property that claimed the role first.
        existing: String,
        /// Property that claimed it second.
        conflicting: String,
    },

    /// A property name is declared twice on one model.
    #[error("model {model} declares property `{property}` more than once")]
    DuplicateProperty {
        /// The offending model.
        model: ModelId,
        /// Duplicated property name.
        property: String,
    },

    /// Two persisted properties map to the same table attribute.
    #[error("model {model}: attribute `{attribute}` is used by both `{existing}` and `{conflicting}`")]
    DuplicateAttribute {
        /// The offending model.
        model: ModelId,
        /// Attribute name in the table.
        attribute: String,
        /// Property mapped to the attribute first.
        existing: String,
        /// Property mapped to it second.
        conflicting: String,
    },

    /// Lookup for a model that was never registered.
    #[error("unknown model: {0}")]
    UnknownModel(ModelId),

    /// A different declaration is already registered under this id.
    #[error("model {0} is already registered with a different declaration")]
    ConflictingDeclaration(ModelId),

    /// Declaration document could not be parsed.
    #[error("invalid declaration document: {0}")]
    Json(#[from] serde_json::Error),

    /// Declaration document could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conflict_display() {
        let err = Error::IndexConflict {
            model: ModelId::new("ModelWithWrongIndexes"),
            kind: IndexKind::Global,
            index: "active-index".to_string(),
            role: KeyType::Range,
            existing: "createdAt".to_string(),
            conflicting: "updatedAt".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("global index `active-index`"));
        assert!(msg.contains("RANGE"));
        assert!(msg.contains("`createdAt`"));
        assert!(msg.contains("`updatedAt`"));
    }

    #[test]
    fn test_missing_partition_key_display() {
        let err = Error::MissingPartitionKey {
            model: ModelId::new("SimpleModel"),
        };
        assert_eq!(err.to_string(), "model SimpleModel has no partition key");
    }

    #[test]
    fn test_duplicate_attribute_display() {
        let err = Error::DuplicateAttribute {
            model: ModelId::new("Account"),
            attribute: "status".to_string(),
            existing: "active".to_string(),
            conflicting: "status".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "model Account: attribute `status` is used by both `active` and `status`"
        );
    }
}
