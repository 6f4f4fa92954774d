//! Model descriptors.

use super::index::{resolve_indexes, IndexDescriptor};
use super::key::KeyType;
use super::property::{build_property, PropertyDescriptor};
use crate::config::RegistryConfig;
use crate::declare::ModelDecl;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Stable identity of a model, used as the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a model id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ModelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolved storage shape of one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Registry key.
    pub id: ModelId,
    /// Class name.
    pub name: String,
    /// Table the model is stored in.
    pub table_name: String,
    /// Persisted properties in declaration order.
    pub properties: Vec<PropertyDescriptor>,
    /// Transient properties in declaration order.
    pub transient_properties: Vec<PropertyDescriptor>,
    /// Global secondary indexes by name.
    pub global_secondary_indexes: BTreeMap<String, IndexDescriptor>,
    /// Local secondary indexes by name.
    pub local_secondary_indexes: BTreeMap<String, IndexDescriptor>,
}

impl ModelDescriptor {
    /// Get a persisted or transient property by name.
    pub fn get_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.all_properties().find(|p| p.name == name)
    }

    /// Iterate persisted then transient properties.
    pub fn all_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().chain(self.transient_properties.iter())
    }

    /// The partition key property.
    pub fn partition_key(&self) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.is_partition_key())
    }

    /// The sort key property.
    pub fn sort_key(&self) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.is_sort_key())
    }

    /// Check if the model has any secondary index.
    pub fn has_indexes(&self) -> bool {
        !self.global_secondary_indexes.is_empty() || !self.local_secondary_indexes.is_empty()
    }
}

/// Build the descriptor of a declared model.
pub fn build_model(decl: &ModelDecl, config: &RegistryConfig) -> Result<ModelDescriptor> {
    let id = decl.model_id();

    let mut seen = HashSet::with_capacity(decl.properties.len());
    let mut properties = Vec::new();
    let mut transient_properties = Vec::new();

    for property_decl in &decl.properties {
        if !seen.insert(property_decl.name.as_str()) {
            return Err(Error::DuplicateProperty {
                model: id,
                property: property_decl.name.clone(),
            });
        }

        let property = build_property(&id, property_decl);
        if property.transient {
            transient_properties.push(property);
        } else {
            properties.push(property);
        }
    }

    let mut attributes: HashMap<&str, &str> = HashMap::with_capacity(properties.len());
    for property in &properties {
        if let Some(existing) = attributes.insert(property.name_db.as_str(), property.name.as_str()) {
            return Err(Error::DuplicateAttribute {
                model: id,
                attribute: property.name_db.clone(),
                existing: existing.to_string(),
                conflicting: property.name.clone(),
            });
        }
    }

    let partition_key = single_key(&id, &properties, KeyType::Hash)?;
    single_key(&id, &properties, KeyType::Range)?;

    let indexes = resolve_indexes(&id, partition_key, &properties)?;
    let table_name = config.table_name(&decl.name, decl.table_name.as_deref());

    debug!(
        model = %id,
        table = %table_name,
        properties = properties.len(),
        transient = transient_properties.len(),
        gsi = indexes.global.len(),
        lsi = indexes.local.len(),
        "built model metadata"
    );

    Ok(ModelDescriptor {
        id,
        name: decl.name.clone(),
        table_name,
        properties,
        transient_properties,
        global_secondary_indexes: indexes.global,
        local_secondary_indexes: indexes.local,
    })
}

/// Find the single property holding a primary key role.
fn single_key<'a>(
    model: &ModelId,
    properties: &'a [PropertyDescriptor],
    role: KeyType,
) -> Result<Option<&'a str>> {
    let mut holders = properties.iter().filter(|p| p.key_type() == Some(role));

    let first = holders.next();
    if let (Some(existing), Some(conflicting)) = (first, holders.next()) {
        return Err(Error::KeyConflict {
            model: model.clone(),
            role,
            existing: existing.name.clone(),
            conflicting: conflicting.name.clone(),
        });
    }

    Ok(first.map(|p| p.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableNaming;
    use crate::declare::PropertyDecl;
    use crate::metadata::TypeRef;

    fn build(decl: ModelDecl) -> Result<ModelDescriptor> {
        build_model(&decl, &RegistryConfig::default())
    }

    #[test]
    fn test_empty_model() {
        let model = build(ModelDecl::new("SimpleModel")).unwrap();

        assert_eq!(model.id, ModelId::new("SimpleModel"));
        assert_eq!(model.name, "SimpleModel");
        assert_eq!(model.table_name, "simple-model");
        assert!(model.properties.is_empty());
        assert!(model.transient_properties.is_empty());
        assert!(!model.has_indexes());
        assert!(model.partition_key().is_none());
    }

    #[test]
    fn test_table_name_override_and_naming() {
        let model = build(ModelDecl::new("CustomTableNameModel").with_table_name("myCustomName"))
            .unwrap();
        assert_eq!(model.table_name, "myCustomName");

        let config = RegistryConfig::new().with_table_naming(TableNaming::SnakeCase);
        let model = build_model(&ModelDecl::new("ComplexModel"), &config).unwrap();
        assert_eq!(model.table_name, "complex_model");
    }

    #[test]
    fn test_partitions_preserve_order() {
        let model = build(
            ModelDecl::new("Mixed")
                .with_property(PropertyDecl::new("a", TypeRef::String).partition_key())
                .with_property(PropertyDecl::new("t1", TypeRef::String).transient())
                .with_property(PropertyDecl::new("b", TypeRef::Number))
                .with_property(PropertyDecl::new("t2", TypeRef::Boolean).transient())
                .with_property(PropertyDecl::new("c", TypeRef::Boolean)),
        )
        .unwrap();

        let names: Vec<_> = model.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        let transient: Vec<_> = model
            .transient_properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(transient, vec!["t1", "t2"]);

        assert!(model.get_property("t2").is_some());
        assert_eq!(model.partition_key().map(|p| p.name.as_str()), Some("a"));
    }

    #[test]
    fn test_duplicate_property() {
        let err = build(
            ModelDecl::new("Dup")
                .with_property(PropertyDecl::new("id", TypeRef::String))
                .with_property(PropertyDecl::new("id", TypeRef::Number)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateProperty { property, .. } if property == "id"));
    }

    #[test]
    fn test_rename_onto_existing_attribute() {
        let err = build(
            ModelDecl::new("Account")
                .with_property(PropertyDecl::new("active", TypeRef::Boolean).rename("status"))
                .with_property(PropertyDecl::new("status", TypeRef::String)),
        )
        .unwrap_err();

        match err {
            Error::DuplicateAttribute {
                attribute,
                existing,
                conflicting,
                ..
            } => {
                assert_eq!(attribute, "status");
                assert_eq!(existing, "active");
                assert_eq!(conflicting, "status");
            }
            other => panic!("Expected DuplicateAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_rename_onto_partition_key_attribute() {
        let err = build(
            ModelDecl::new("Account")
                .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
                .with_property(PropertyDecl::new("other", TypeRef::String).rename("id")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateAttribute { attribute, .. } if attribute == "id"));
    }

    #[test]
    fn test_transient_attribute_name_may_repeat() {
        let model = build(
            ModelDecl::new("Account")
                .with_property(PropertyDecl::new("status", TypeRef::String))
                .with_property(PropertyDecl::new("cached", TypeRef::String).rename("status").transient()),
        )
        .unwrap();
        assert_eq!(model.properties.len(), 1);
        assert_eq!(model.transient_properties.len(), 1);
    }

    #[test]
    fn test_two_partition_keys() {
        let err = build(
            ModelDecl::new("TwoHashes")
                .with_property(PropertyDecl::new("a", TypeRef::String).partition_key())
                .with_property(PropertyDecl::new("b", TypeRef::String).partition_key()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::KeyConflict { role: KeyType::Hash, .. }));
    }

    #[test]
    fn test_two_sort_keys() {
        let err = build(
            ModelDecl::new("TwoRanges")
                .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
                .with_property(PropertyDecl::new("a", TypeRef::Number).sort_key())
                .with_property(PropertyDecl::new("b", TypeRef::Number).sort_key()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::KeyConflict { role: KeyType::Range, .. }));
    }

    #[test]
    fn test_transient_key_does_not_count() {
        let model = build(
            ModelDecl::new("Shadow")
                .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
                .with_property(PropertyDecl::new("shadow", TypeRef::String).partition_key().transient()),
        )
        .unwrap();

        assert_eq!(model.partition_key().map(|p| p.name.as_str()), Some("id"));
        assert!(model.transient_properties[0].key.is_none());
    }

    #[test]
    fn test_repeated_builds_are_equal() {
        let decl = ModelDecl::new("Stable")
            .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
            .with_property(PropertyDecl::new("z", TypeRef::Number).gsi_partition_key("z-index"))
            .with_property(PropertyDecl::new("a", TypeRef::Number).gsi_partition_key("a-index"));

        assert_eq!(build(decl.clone()).unwrap(), build(decl).unwrap());
    }
}
