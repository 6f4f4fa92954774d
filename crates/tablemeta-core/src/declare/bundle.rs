//! Declaration documents.
//!
//! Models can be declared in JSON instead of code, which lets a host keep its
//! table layout next to its deployment configuration.

use super::model::ModelDecl;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A set of model declarations loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDeclarations {
    /// Declared models.
    #[serde(default)]
    pub models: Vec<ModelDecl>,
}

impl ModelDeclarations {
    /// Create an empty declaration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model declaration.
    pub fn with_model(mut self, model: ModelDecl) -> Self {
        self.models.push(model);
        self
    }

    /// Parse declarations from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read declarations from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Render declarations as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get a model declaration by class name.
    pub fn get(&self, name: &str) -> Option<&ModelDecl> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Number of declared models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if no models are declared.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl IntoIterator for ModelDeclarations {
    type Item = ModelDecl;
    type IntoIter = std::vec::IntoIter<ModelDecl>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::{Annotation, PropertyDecl};
    use crate::error::Error;
    use crate::metadata::TypeRef;

    const DOC: &str = r#"{
        "models": [
            {
                "name": "ModelWithDateMoment",
                "properties": [
                    { "name": "id", "type": "string",
                      "annotations": [{ "annotation": "partition_key" }] },
                    { "name": "creationDate", "type": { "class": "Moment" },
                      "annotations": [{ "annotation": "sort_key" }] },
                    { "name": "lastUpdated", "type": { "class": "Moment" } }
                ]
            },
            { "name": "CustomTableNameModel", "table_name": "myCustomName" }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let decls = ModelDeclarations::from_json(DOC).unwrap();
        assert_eq!(decls.len(), 2);

        let dated = decls.get("ModelWithDateMoment").unwrap();
        assert_eq!(dated.properties.len(), 3);
        assert_eq!(dated.properties[1].declared_type, TypeRef::class("Moment"));
        assert_eq!(dated.properties[1].annotations, vec![Annotation::SortKey]);

        let custom = decls.get("CustomTableNameModel").unwrap();
        assert_eq!(custom.table_name.as_deref(), Some("myCustomName"));
        assert!(custom.properties.is_empty());
    }

    #[test]
    fn test_json_survives_rendering() {
        let decls = ModelDeclarations::new().with_model(
            ModelDecl::new("Tagged")
                .with_property(PropertyDecl::new("id", TypeRef::String).partition_key().uuid())
                .with_property(PropertyDecl::new("tags", TypeRef::Set).of(TypeRef::String).sorted()),
        );

        let reparsed = ModelDeclarations::from_json(&decls.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, decls);
    }

    #[test]
    fn test_invalid_json() {
        let err = ModelDeclarations::from_json(r#"{ "models": [ { "properties": [] } ] }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
