//! Property declarations.

use crate::metadata::TypeRef;
use serde::{Deserialize, Serialize};

/// A single marker attached to a property.
///
/// Several annotations may target the same property; the property builder
/// merges them in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum Annotation {
    /// Table partition key.
    PartitionKey,
    /// Table sort key.
    SortKey,
    /// Partition key of the named global secondary index.
    GsiPartitionKey {
        /// Index name.
        index: String,
    },
    /// Sort key of the named global secondary index.
    GsiSortKey {
        /// Index name.
        index: String,
    },
    /// Partition key of the named local secondary index. Must be the
    /// table partition key; local indexes without it inherit that key.
    LsiPartitionKey {
        /// Index name.
        index: String,
    },
    /// Sort key of the named local secondary index.
    LsiSortKey {
        /// Index name.
        index: String,
    },
    /// Store the property under a different attribute name.
    Rename {
        /// Attribute name in the table.
        name: String,
    },
    /// Exclude the property from persistence.
    Transient,
    /// Persist the collection preserving element order.
    SortedCollection,
    /// Key values are generated.
    Uuid,
}

/// Declaration of one model property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    /// Property name in the application model.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub declared_type: TypeRef,
    /// Element types for collection properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element_types: Vec<TypeRef>,
    /// Attached annotations, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl PropertyDecl {
    /// Declare a property with no annotations.
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            element_types: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Declare an element type of a collection property.
    pub fn of(mut self, element: TypeRef) -> Self {
        self.element_types.push(element);
        self
    }

    /// Mark as the table partition key.
    pub fn partition_key(self) -> Self {
        self.annotate(Annotation::PartitionKey)
    }

    /// Mark as the table sort key.
    pub fn sort_key(self) -> Self {
        self.annotate(Annotation::SortKey)
    }

    /// Mark as partition key of a global secondary index.
    pub fn gsi_partition_key(self, index: impl Into<String>) -> Self {
        self.annotate(Annotation::GsiPartitionKey {
            index: index.into(),
        })
    }

    /// Mark as sort key of a global secondary index.
    pub fn gsi_sort_key(self, index: impl Into<String>) -> Self {
        self.annotate(Annotation::GsiSortKey {
            index: index.into(),
        })
    }

    /// Mark as partition key of a local secondary index.
    pub fn lsi_partition_key(self, index: impl Into<String>) -> Self {
        self.annotate(Annotation::LsiPartitionKey {
            index: index.into(),
        })
    }

    /// Mark as sort key of a local secondary index.
    pub fn lsi_sort_key(self, index: impl Into<String>) -> Self {
        self.annotate(Annotation::LsiSortKey {
            index: index.into(),
        })
    }

    /// Store under a different attribute name.
    pub fn rename(self, name: impl Into<String>) -> Self {
        self.annotate(Annotation::Rename { name: name.into() })
    }

    /// Exclude from persistence.
    pub fn transient(self) -> Self {
        self.annotate(Annotation::Transient)
    }

    /// Persist as an ordered collection.
    pub fn sorted(self) -> Self {
        self.annotate(Annotation::SortedCollection)
    }

    /// Generate key values.
    pub fn uuid(self) -> Self {
        self.annotate(Annotation::Uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_decl_builder() {
        let decl = PropertyDecl::new("sortedComplexSet", TypeRef::Set)
            .of(TypeRef::class("NestedObject"))
            .sorted();

        assert_eq!(decl.name, "sortedComplexSet");
        assert_eq!(decl.element_types, vec![TypeRef::class("NestedObject")]);
        assert_eq!(decl.annotations, vec![Annotation::SortedCollection]);
    }

    #[test]
    fn test_annotation_json() {
        let decl: PropertyDecl = serde_json::from_str(
            r#"{
                "name": "active",
                "type": "boolean",
                "annotations": [
                    { "annotation": "gsi_partition_key", "index": "active-index" },
                    { "annotation": "rename", "name": "isActive" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            decl,
            PropertyDecl::new("active", TypeRef::Boolean)
                .gsi_partition_key("active-index")
                .rename("isActive")
        );
    }

    #[test]
    fn test_lsi_annotation_json() {
        let decl: PropertyDecl = serde_json::from_str(
            r#"{
                "name": "myId",
                "type": "string",
                "annotations": [
                    { "annotation": "partition_key" },
                    { "annotation": "lsi_partition_key", "index": "count-index" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            decl,
            PropertyDecl::new("myId", TypeRef::String)
                .partition_key()
                .lsi_partition_key("count-index")
        );
    }
}
