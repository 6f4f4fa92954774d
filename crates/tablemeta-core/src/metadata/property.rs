//! Property descriptors.

use super::key::{KeyDescriptor, KeyType};
use super::model::ModelId;
use super::types::{classify, TypeInfo};
use crate::declare::{Annotation, PropertyDecl};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Resolved description of one model property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name in the application model.
    pub name: String,
    /// Attribute name in the table.
    pub name_db: String,
    /// Role in the table's primary key.
    pub key: Option<KeyDescriptor>,
    /// Excluded from persistence.
    pub transient: bool,
    /// Collection persisted in element order.
    pub is_sorted_collection: bool,
    /// Classified type.
    pub type_info: TypeInfo,
    /// Role per global secondary index.
    pub key_for_gsi: BTreeMap<String, KeyType>,
    /// Role per local secondary index.
    pub key_for_lsi: BTreeMap<String, KeyType>,
}

impl PropertyDescriptor {
    /// Check if this property is the table partition key.
    pub fn is_partition_key(&self) -> bool {
        self.key_type() == Some(KeyType::Hash)
    }

    /// Check if this property is the table sort key.
    pub fn is_sort_key(&self) -> bool {
        self.key_type() == Some(KeyType::Range)
    }

    /// The primary key role, if any.
    pub fn key_type(&self) -> Option<KeyType> {
        self.key.map(|k| k.key_type)
    }

    /// Check if this property participates in any secondary index.
    pub fn is_indexed(&self) -> bool {
        !self.key_for_gsi.is_empty() || !self.key_for_lsi.is_empty()
    }
}

/// Build a property descriptor by merging the property's annotations.
///
/// Annotations apply in declaration order and the first one to set a field
/// wins. `Uuid` applies to the key once all key roles are known.
pub fn build_property(model: &ModelId, decl: &PropertyDecl) -> PropertyDescriptor {
    let mut key: Option<KeyDescriptor> = None;
    let mut rename: Option<&str> = None;
    let mut transient = false;
    let mut sorted = false;
    let mut uuid = false;
    let mut key_for_gsi = BTreeMap::new();
    let mut key_for_lsi = BTreeMap::new();

    for annotation in &decl.annotations {
        match annotation {
            Annotation::PartitionKey => set_key(model, decl, &mut key, KeyDescriptor::hash()),
            Annotation::SortKey => set_key(model, decl, &mut key, KeyDescriptor::range()),
            Annotation::GsiPartitionKey { index } => {
                set_index_role(model, decl, &mut key_for_gsi, index, KeyType::Hash)
            }
            Annotation::GsiSortKey { index } => {
                set_index_role(model, decl, &mut key_for_gsi, index, KeyType::Range)
            }
            Annotation::LsiPartitionKey { index } => {
                set_index_role(model, decl, &mut key_for_lsi, index, KeyType::Hash)
            }
            Annotation::LsiSortKey { index } => {
                set_index_role(model, decl, &mut key_for_lsi, index, KeyType::Range)
            }
            Annotation::Rename { name } => match rename {
                None => rename = Some(name.as_str()),
                Some(existing) => warn!(
                    model = %model,
                    property = %decl.name,
                    existing,
                    ignored = %name,
                    "property renamed more than once"
                ),
            },
            Annotation::Transient => transient = true,
            Annotation::SortedCollection => sorted = true,
            Annotation::Uuid => uuid = true,
        }
    }

    if uuid {
        match key.as_mut() {
            Some(k) => k.uuid = true,
            None => warn!(
                model = %model,
                property = %decl.name,
                "uuid generation declared on a property without a key role"
            ),
        }
    }

    if transient && (key.is_some() || !key_for_gsi.is_empty() || !key_for_lsi.is_empty()) {
        warn!(
            model = %model,
            property = %decl.name,
            "dropping key and index roles of transient property"
        );
        key = None;
        key_for_gsi.clear();
        key_for_lsi.clear();
    }

    PropertyDescriptor {
        name: decl.name.clone(),
        name_db: rename.unwrap_or(decl.name.as_str()).to_string(),
        key,
        transient,
        is_sorted_collection: sorted,
        type_info: classify(&decl.declared_type, &decl.element_types),
        key_for_gsi,
        key_for_lsi,
    }
}

fn set_key(
    model: &ModelId,
    decl: &PropertyDecl,
    slot: &mut Option<KeyDescriptor>,
    key: KeyDescriptor,
) {
    match slot {
        None => *slot = Some(key),
        Some(existing) => warn!(
            model = %model,
            property = %decl.name,
            existing = %existing.key_type,
            ignored = %key.key_type,
            "property declared as more than one primary key role"
        ),
    }
}

fn set_index_role(
    model: &ModelId,
    decl: &PropertyDecl,
    roles: &mut BTreeMap<String, KeyType>,
    index: &str,
    role: KeyType,
) {
    match roles.get(index) {
        None => {
            roles.insert(index.to_string(), role);
        }
        Some(existing) => warn!(
            model = %model,
            property = %decl.name,
            index,
            existing = %existing,
            ignored = %role,
            "property declared with more than one role for the same index"
        ),
    }
}
