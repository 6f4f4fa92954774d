//! Registry configuration.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Convention used to derive a table name from a model's class name when the
/// model does not declare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableNaming {
    /// `SimpleModel` becomes `simple-model`.
    #[default]
    KebabCase,
    /// `SimpleModel` becomes `simple_model`.
    SnakeCase,
    /// The class name is used unchanged.
    Verbatim,
}

impl TableNaming {
    /// Derive a table name from a class name.
    pub fn apply(&self, class_name: &str) -> String {
        match self {
            TableNaming::KebabCase => class_name.to_case(Case::Kebab),
            TableNaming::SnakeCase => class_name.to_case(Case::Snake),
            TableNaming::Verbatim => class_name.to_string(),
        }
    }
}

/// Configuration for the metadata registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Naming convention for models without an explicit table name.
    pub table_naming: TableNaming,
}

impl RegistryConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table naming convention.
    pub fn with_table_naming(mut self, naming: TableNaming) -> Self {
        self.table_naming = naming;
        self
    }

    /// Resolve the table name for a model.
    pub fn table_name(&self, class_name: &str, explicit: Option<&str>) -> String {
        match explicit {
            Some(name) => name.to_string(),
            None => self.table_naming.apply(class_name),
        }
    }
}
