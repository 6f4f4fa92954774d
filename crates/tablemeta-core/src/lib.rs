//! TableMeta Core - model metadata for key-value table schemas.
//!
//! Models are declared as plain data (in code, through [`Declared`], or from
//! JSON) and resolved on first lookup into descriptors of their table shape:
//! table name, partition and sort key, secondary indexes and per-property
//! type classification.
//!
//! ```
//! use tablemeta_core::{MetadataRegistry, ModelDecl, PropertyDecl, TypeRef};
//!
//! let registry = MetadataRegistry::default();
//! registry
//!     .register(
//!         ModelDecl::new("Order")
//!             .with_property(PropertyDecl::new("id", TypeRef::String).partition_key())
//!             .with_property(PropertyDecl::new("placedAt", TypeRef::Number).sort_key()),
//!     )
//!     .unwrap();
//!
//! let metadata = registry.get("Order").unwrap();
//! assert_eq!(metadata.model().table_name, "order");
//! assert_eq!(metadata.sort_key(), Some("placedAt"));
//! ```

pub mod config;
pub mod declare;
pub mod error;
pub mod metadata;
pub mod registry;

pub use config::{RegistryConfig, TableNaming};
pub use declare::{Annotation, Declared, ModelDecl, ModelDeclarations, PropertyDecl};
pub use error::{Error, Result};
pub use metadata::{
    build_model, build_property, classify, resolve_indexes, IndexDescriptor, IndexKind,
    KeyDescriptor, KeyType, ModelDescriptor, ModelId, PropertyDescriptor, ResolvedIndexes,
    TypeInfo, TypeRef,
};
pub use registry::{Metadata, MetadataRegistry};
