//! Secondary index resolution.

use super::key::KeyType;
use super::model::ModelId;
use super::property::PropertyDescriptor;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Global or local secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Independent partition and sort key.
    Global,
    /// Shares the table's partition key.
    Local,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Global => write!(f, "global"),
            IndexKind::Local => write!(f, "local"),
        }
    }
}

/// A named secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Index name.
    pub name: String,
    /// Property supplying the partition key.
    pub partition_key: String,
    /// Property supplying the sort key.
    pub sort_key: Option<String>,
}

/// Index tables of one model, keyed by index name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIndexes {
    /// Global secondary indexes.
    pub global: BTreeMap<String, IndexDescriptor>,
    /// Local secondary indexes.
    pub local: BTreeMap<String, IndexDescriptor>,
}

#[derive(Default)]
struct Slots<'a> {
    partition_key: Option<&'a str>,
    sort_key: Option<&'a str>,
}

/// Fold per-property index roles into index tables.
///
/// `partition_key` is the table's partition key property. Every local index
/// uses it; a local index that names its own partition key must name that
/// same property. Transient properties are skipped.
pub fn resolve_indexes(
    model: &ModelId,
    partition_key: Option<&str>,
    properties: &[PropertyDescriptor],
) -> Result<ResolvedIndexes> {
    let global = fold_roles(model, IndexKind::Global, properties, |p| &p.key_for_gsi)?;
    let local = fold_roles(model, IndexKind::Local, properties, |p| &p.key_for_lsi)?;

    let global = global
        .into_iter()
        .map(|(name, slots)| -> Result<(String, IndexDescriptor)> {
            let pk = slots.partition_key.ok_or_else(|| Error::IncompleteIndex {
                model: model.clone(),
                kind: IndexKind::Global,
                index: name.to_string(),
            })?;
            Ok((name.to_string(), descriptor(name, pk, slots.sort_key)))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    let local = local
        .into_iter()
        .map(|(name, slots)| -> Result<(String, IndexDescriptor)> {
            let pk = partition_key.ok_or_else(|| Error::MissingPartitionKey {
                model: model.clone(),
            })?;
            if let Some(declared) = slots.partition_key {
                if declared != pk {
                    return Err(Error::IndexConflict {
                        model: model.clone(),
                        kind: IndexKind::Local,
                        index: name.to_string(),
                        role: KeyType::Hash,
                        existing: pk.to_string(),
                        conflicting: declared.to_string(),
                    });
                }
            }
            Ok((name.to_string(), descriptor(name, pk, slots.sort_key)))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(ResolvedIndexes { global, local })
}

fn fold_roles<'a, F>(
    model: &ModelId,
    kind: IndexKind,
    properties: &'a [PropertyDescriptor],
    roles: F,
) -> Result<BTreeMap<&'a str, Slots<'a>>>
where
    F: Fn(&'a PropertyDescriptor) -> &'a BTreeMap<String, KeyType>,
{
    let mut indexes: BTreeMap<&'a str, Slots<'a>> = BTreeMap::new();

    for property in properties.iter().filter(|p| !p.transient) {
        for (index, role) in roles(property) {
            let slots = indexes.entry(index.as_str()).or_default();
            let slot = match role {
                KeyType::Hash => &mut slots.partition_key,
                KeyType::Range => &mut slots.sort_key,
            };

            match *slot {
                Some(existing) if existing != property.name => {
                    return Err(Error::IndexConflict {
                        model: model.clone(),
                        kind,
                        index: index.clone(),
                        role: *role,
                        existing: existing.to_string(),
                        conflicting: property.name.clone(),
                    });
                }
                Some(_) => {}
                None => *slot = Some(property.name.as_str()),
            }
        }
    }

    Ok(indexes)
}

fn descriptor(name: &str, partition_key: &str, sort_key: Option<&str>) -> IndexDescriptor {
    IndexDescriptor {
        name: name.to_string(),
        partition_key: partition_key.to_string(),
        sort_key: sort_key.map(str::to_string),
    }
}
