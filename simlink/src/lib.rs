#![doc=include_str!( "../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![deny(unsafe_code)]
#![deny(clippy::all)]

// Re-export the simlink-schema crate
pub use simlink_schema as schema;

use schema::{Dims, EntryKind, Orientation};

pub mod catalog;
pub mod host_type;
pub mod key;
pub mod loader;
pub mod model_info;
pub mod registry;

pub use catalog::{Catalog, CatalogEntry};
pub use host_type::{DefaultTypeMapper, HostTypeMapper, TableTypeMapper};
pub use key::{Key1, Key2, MapId};
pub use loader::{load_model, OwningMap};
pub use model_info::{LoadState, ModelInfo};
pub use registry::ModelRegistry;

/// Crate-wide Result type
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// An entry with an equal key is already in the catalog. Fatal for the whole model load.
    #[error("Duplicate {kind} '{key}'")]
    DuplicateKey { kind: EntryKind, key: String },

    /// No entry with an equal key exists in this model.
    #[error("Unknown {kind} '{key}'")]
    NotFound { kind: EntryKind, key: String },

    #[error("No host type known for native type '{0}'")]
    UnknownType(String),

    #[error("Dimensions {dims} are not valid for {orientation} orientation")]
    InvalidDimensions { orientation: Orientation, dims: Dims },

    #[error("{kind} '{name}' has no owning block")]
    MissingBlockName { kind: EntryKind, name: String },

    #[error("Model '{0}' is already loaded")]
    DuplicateModel(String),

    #[error("Model '{0}' is not loaded")]
    UnknownModel(String),

    #[error(transparent)]
    Schema(#[from] schema::Error),
}

impl Error {
    /// Returns `true` if this is a recoverable "does not exist" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::UnknownModel(_))
    }
}
