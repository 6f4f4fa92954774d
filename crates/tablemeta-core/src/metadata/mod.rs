//! Model metadata for TableMeta.
//!
//! Descriptors are built from declarations by pure functions: types are
//! classified, properties merged, models aggregated and indexes validated.

mod index;
mod key;
mod model;
mod property;
mod types;

pub use index::{resolve_indexes, IndexDescriptor, IndexKind, ResolvedIndexes};
pub use key::{KeyDescriptor, KeyType};
pub use model::{build_model, ModelDescriptor, ModelId};
pub use property::{build_property, PropertyDescriptor};
pub use types::{classify, TypeInfo, TypeRef};
