//! Composite lookup keys scoped by the metadata map they came from.
//!
//! Names are only unique within one model's map, so every key carries the [`MapId`] of its owning
//! map. Two keys are equal only if they have the same owner and byte-identical labels; labels are
//! never trimmed or case-folded.

use std::{
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

/// Opaque identity of one model's metadata map.
///
/// Ids are handed out by [`MapId::next`] and are unique for the lifetime of the process, so a
/// freshly loaded map can never alias a map that was unloaded earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(u64);

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

impl MapId {
    pub fn next() -> Self {
        Self(NEXT_MAP_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

/// Hash of `value` that does not depend on any `HashMap`'s random state.
///
/// The algorithm behind `DefaultHasher::new()` may change between Rust releases, so the result is
/// stable within one toolchain only and must not be persisted.
fn stable_hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A key made of a single label, used for model parameters.
#[derive(Debug, Clone)]
pub struct Key1 {
    label: String,
    owner: MapId,
}

impl Key1 {
    pub fn new(label: impl Into<String>, owner: MapId) -> Self {
        Self {
            label: label.into(),
            owner,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn owner(&self) -> MapId {
        self.owner
    }

    pub fn stable_hash(&self) -> u64 {
        stable_hash_of(self)
    }
}

impl PartialEq for Key1 {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.label == other.label
    }
}

impl Eq for Key1 {}

impl Hash for Key1 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.label.hash(state);
    }
}

impl Ord for Key1 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.owner, &self.label).cmp(&(other.owner, &other.label))
    }
}

impl PartialOrd for Key1 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Key1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// An order-sensitive key made of two labels, used for block parameters and signals.
///
/// `a` is the block path and `b` the element name; `(a, b)` never equals `(b, a)` unless the
/// labels are identical.
#[derive(Debug, Clone)]
pub struct Key2 {
    a: String,
    b: String,
    owner: MapId,
}

impl Key2 {
    pub fn new(a: impl Into<String>, b: impl Into<String>, owner: MapId) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            owner,
        }
    }

    pub fn labels(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    pub fn owner(&self) -> MapId {
        self.owner
    }

    pub fn stable_hash(&self) -> u64 {
        stable_hash_of(self)
    }
}

impl PartialEq for Key2 {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.a == other.a && self.b == other.b
    }
}

impl Eq for Key2 {}

impl Hash for Key2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `str` hashing is prefix-free, so ("ab", "c") and ("a", "bc") stay distinct.
        self.owner.hash(state);
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl Ord for Key2 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.owner, &self.a, &self.b).cmp(&(other.owner, &other.a, &other.b))
    }
}

impl PartialOrd for Key2 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Key2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}
