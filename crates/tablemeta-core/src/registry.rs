//! Metadata registry.
//!
//! The registry holds model declarations and lazily builds their metadata on
//! first lookup. Built metadata is cached for the lifetime of the registry and
//! shared by `Arc`, so repeated lookups return the same instance.

use crate::config::RegistryConfig;
use crate::declare::{Declared, ModelDecl};
use crate::error::{Error, Result};
use crate::metadata::{build_model, IndexDescriptor, ModelDescriptor, ModelId, PropertyDescriptor};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Built metadata of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    model: ModelDescriptor,
}

impl Metadata {
    /// Wrap a built model descriptor.
    pub fn new(model: ModelDescriptor) -> Self {
        Self { model }
    }

    /// The model descriptor.
    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }

    /// Look up a persisted or transient property by name.
    pub fn for_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.model.get_property(name)
    }

    /// Name of the partition key property.
    pub fn partition_key(&self) -> Result<&str> {
        self.model
            .partition_key()
            .map(|p| p.name.as_str())
            .ok_or_else(|| Error::MissingPartitionKey {
                model: self.model.id.clone(),
            })
    }

    /// Name of the sort key property, if declared.
    pub fn sort_key(&self) -> Option<&str> {
        self.model.sort_key().map(|p| p.name.as_str())
    }

    /// Look up a global secondary index.
    pub fn global_index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.model.global_secondary_indexes.get(name)
    }

    /// Look up a local secondary index.
    pub fn local_index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.model.local_secondary_indexes.get(name)
    }
}

/// Registry of model declarations and their built metadata.
pub struct MetadataRegistry {
    config: RegistryConfig,
    declarations: DashMap<ModelId, Arc<ModelDecl>>,
    cache: DashMap<ModelId, Arc<Metadata>>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            declarations: DashMap::new(),
            cache: DashMap::new(),
        }
    }

    /// Register a model declaration.
    ///
    /// Registering an identical declaration again is a no-op.
    pub fn register(&self, decl: ModelDecl) -> Result<ModelId> {
        let id = decl.model_id();

        match self.declarations.entry(id.clone()) {
            Entry::Occupied(entry) => {
                if **entry.get() != decl {
                    return Err(Error::ConflictingDeclaration(id));
                }
            }
            Entry::Vacant(entry) => {
                debug!(model = %id, properties = decl.properties.len(), "registered model");
                entry.insert(Arc::new(decl));
            }
        }

        Ok(id)
    }

    /// Register every declaration in a set.
    pub fn register_all(&self, decls: impl IntoIterator<Item = ModelDecl>) -> Result<Vec<ModelId>> {
        decls.into_iter().map(|decl| self.register(decl)).collect()
    }

    /// Register a type's own declaration under its type id.
    pub fn register_type<T: Declared>(&self) -> Result<ModelId> {
        self.register(T::declaration().with_id(T::model_id()))
    }

    /// Check if a model is registered.
    pub fn is_registered(&self, id: &str) -> bool {
        self.declarations.contains_key(id)
    }

    /// Ids of all registered models, sorted.
    pub fn registered_models(&self) -> Vec<ModelId> {
        let mut ids: Vec<_> = self.declarations.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Number of models whose metadata has been built.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// The registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the metadata of a model, building it on first use.
    ///
    /// A model is built at most once: concurrent callers missing the cache
    /// wait on the entry while the first one builds. Build failures are
    /// returned to every caller and never cached.
    pub fn get(&self, id: &str) -> Result<Arc<Metadata>> {
        if let Some(cached) = self.cache.get(id) {
            trace!(model = id, "metadata cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let decl = self
            .declarations
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::UnknownModel(ModelId::new(id)))?;

        match self.cache.entry(decl.model_id()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let metadata = Arc::new(Metadata::new(build_model(&decl, &self.config)?));
                entry.insert(Arc::clone(&metadata));
                Ok(metadata)
            }
        }
    }

    /// Get the metadata of a declared type.
    pub fn get_type<T: Declared>(&self) -> Result<Arc<Metadata>> {
        self.get(T::model_id().as_str())
    }

    /// Look up a property of a model.
    pub fn for_property(&self, id: &str, name: &str) -> Result<Option<PropertyDescriptor>> {
        Ok(self.get(id)?.for_property(name).cloned())
    }

    /// Name of a model's partition key property.
    pub fn partition_key(&self, id: &str) -> Result<String> {
        self.get(id)?.partition_key().map(str::to_string)
    }

    /// Name of a model's sort key property.
    pub fn sort_key(&self, id: &str) -> Result<Option<String>> {
        Ok(self.get(id)?.sort_key().map(str::to_string))
    }

    /// Look up a global secondary index of a model.
    pub fn global_index(&self, id: &str, index: &str) -> Result<Option<IndexDescriptor>> {
        Ok(self.get(id)?.global_index(index).cloned())
    }

    /// Look up a local secondary index of a model.
    pub fn local_index(&self, id: &str, index: &str) -> Result<Option<IndexDescriptor>> {
        Ok(self.get(id)?.local_index(index).cloned())
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
