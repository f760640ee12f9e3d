//! Name-indexed collections of resolved entries.

use std::{collections::HashMap, fmt::Display, hash::Hash};

use crate::{
    key::{Key1, Key2, MapId},
    schema::{BlockParam, DataType, EntryKind, ModelParam, Signal},
    Error, Result,
};

/// An entry that can be stored in a [`Catalog`].
pub trait CatalogEntry {
    type Key: Hash + Eq + Ord + Display + Clone;

    const KIND: EntryKind;

    /// Build the lookup key for this entry within the map `owner`.
    fn key(&self, owner: MapId) -> Self::Key;

    /// The element's own name, without its block path.
    fn name(&self) -> &str;

    fn data_type(&self) -> &DataType;

    /// Owning block path, for block-scoped entries.
    fn block_name(&self) -> Option<&str> {
        None
    }
}

impl CatalogEntry for ModelParam {
    type Key = Key1;
    const KIND: EntryKind = EntryKind::ModelParam;

    fn key(&self, owner: MapId) -> Key1 {
        Key1::new(self.name.as_str(), owner)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

impl CatalogEntry for BlockParam {
    type Key = Key2;
    const KIND: EntryKind = EntryKind::BlockParam;

    fn key(&self, owner: MapId) -> Key2 {
        Key2::new(self.block_name.as_str(), self.param_name.as_str(), owner)
    }

    fn name(&self) -> &str {
        &self.param_name
    }

    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn block_name(&self) -> Option<&str> {
        Some(&self.block_name)
    }
}

impl CatalogEntry for Signal {
    type Key = Key2;
    const KIND: EntryKind = EntryKind::Signal;

    fn key(&self, owner: MapId) -> Key2 {
        Key2::new(self.block_name.as_str(), self.signal_name.as_str(), owner)
    }

    fn name(&self) -> &str {
        &self.signal_name
    }

    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn block_name(&self) -> Option<&str> {
        Some(&self.block_name)
    }
}

/// A hash-indexed collection of entries belonging to a single owning map.
///
/// Enumeration order is unspecified; use [`Catalog::sorted`] for a stable order.
#[derive(Debug)]
pub struct Catalog<E: CatalogEntry> {
    owner: MapId,
    entries: HashMap<E::Key, E>,
}

impl<E: CatalogEntry> Catalog<E> {
    pub fn new(owner: MapId) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    pub fn owner(&self) -> MapId {
        self.owner
    }

    /// Insert a new entry. An entry with an equal key is never overwritten.
    pub fn insert(&mut self, entry: E) -> Result<()> {
        use std::collections::hash_map::Entry;
        match self.entries.entry(entry.key(self.owner)) {
            Entry::Occupied(occupied) => Err(Error::DuplicateKey {
                kind: E::KIND,
                key: occupied.key().to_string(),
            }),
            Entry::Vacant(vacant) => {
                log::trace!("{} {}: inserting {}", self.owner, E::KIND, vacant.key());
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, key: &E::Key) -> Result<&E> {
        self.entries.get(key).ok_or_else(|| Error::NotFound {
            kind: E::KIND,
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &E::Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    /// All entries ordered by key.
    pub fn sorted(&self) -> Vec<&E> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, E: CatalogEntry> IntoIterator for &'a Catalog<E> {
    type Item = &'a E;
    type IntoIter = std::collections::hash_map::Values<'a, E::Key, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
