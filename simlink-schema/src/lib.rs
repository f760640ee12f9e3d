#![doc=include_str!( "../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![deny(unsafe_code)]
#![deny(clippy::all)]

use thiserror::Error;

pub mod counts;
mod data_type;
mod entry;
pub mod table;

pub use data_type::{DataType, Dims, Orientation};
pub use entry::{BlockParam, EntryKind, ModelParam, Signal};
pub use table::{ElementRecord, MapTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Error parsing metadata table: {0}")]
    Parse(String),
}

#[cfg(feature = "serde")]
pub fn deserialize<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, Error> {
    serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))
}
