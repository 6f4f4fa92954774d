//! Model declarations.

use super::property::PropertyDecl;
use crate::metadata::ModelId;
use serde::{Deserialize, Serialize};

/// Declaration of one model: its identity, optional table name and
/// properties in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDecl {
    /// Registry key. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    /// Class name.
    pub name: String,
    /// Explicit table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Property declarations.
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
}

impl ModelDecl {
    /// Declare a model with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            table_name: None,
            properties: Vec::new(),
        }
    }

    /// Use a registry key different from the class name.
    pub fn with_id(mut self, id: impl Into<ModelId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Add a property.
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    /// Add multiple properties.
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = PropertyDecl>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// The registry key of this model.
    pub fn model_id(&self) -> ModelId {
        self.id
            .clone()
            .unwrap_or_else(|| ModelId::new(self.name.clone()))
    }
}

/// A Rust type that declares its own storage shape.
///
/// ```
/// use tablemeta_core::{Declared, ModelDecl, PropertyDecl, TypeRef};
///
/// struct Order;
///
/// impl Declared for Order {
///     fn declaration() -> ModelDecl {
///         ModelDecl::new("Order")
///             .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
///     }
/// }
/// ```
pub trait Declared: 'static {
    /// Describe this type's properties and key annotations.
    fn declaration() -> ModelDecl;

    /// Registry key for this type.
    fn model_id() -> ModelId {
        ModelId::new(std::any::type_name::<Self>())
    }
}
