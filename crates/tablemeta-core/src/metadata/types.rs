//! Declared property types and their classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Identity of a declared property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// UTF-8 string.
    String,
    /// Any numeric value.
    Number,
    /// Boolean value.
    Boolean,
    /// Unordered collection of unique elements.
    Set,
    /// Ordered collection.
    List,
    /// Keyed map.
    Map,
    /// Untyped object.
    Object,
    /// A named class, e.g. a date type or a nested model.
    Class(String),
}

impl TypeRef {
    /// Create a class type reference.
    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Class(name.into())
    }

    /// Check if this is one of the primitive types.
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::String | TypeRef::Number | TypeRef::Boolean)
    }

    /// Check if this is a collection construct that carries element types.
    pub fn is_collection(&self) -> bool {
        matches!(self, TypeRef::Set | TypeRef::List)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::String => write!(f, "String"),
            TypeRef::Number => write!(f, "Number"),
            TypeRef::Boolean => write!(f, "Boolean"),
            TypeRef::Set => write!(f, "Set"),
            TypeRef::List => write!(f, "List"),
            TypeRef::Map => write!(f, "Map"),
            TypeRef::Object => write!(f, "Object"),
            TypeRef::Class(name) => write!(f, "{name}"),
        }
    }
}

/// Classification of a property's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// The declared type.
    pub type_ref: TypeRef,
    /// True unless the type is a primitive.
    pub is_custom: bool,
    /// Element types of a collection, in declaration order.
    pub generic_types: Vec<TypeRef>,
}

impl TypeInfo {
    /// Check if element types were recorded.
    pub fn has_generic_types(&self) -> bool {
        !self.generic_types.is_empty()
    }
}

/// Classify a declared type.
///
/// Element types are recorded by identity only. Element types supplied for a
/// non-collection type are dropped.
pub fn classify(declared: &TypeRef, element_types: &[TypeRef]) -> TypeInfo {
    let generic_types = if declared.is_collection() {
        element_types.to_vec()
    } else {
        if !element_types.is_empty() {
            warn!(
                declared = %declared,
                count = element_types.len(),
                "ignoring element types on non-collection type"
            );
        }
        Vec::new()
    };

    TypeInfo {
        type_ref: declared.clone(),
        is_custom: !declared.is_primitive(),
        generic_types,
    }
}
