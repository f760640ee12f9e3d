use std::fmt::Display;

use crate::DataType;

/// The three kinds of entries a model catalog holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    ModelParam,
    BlockParam,
    Signal,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::ModelParam => write!(f, "model parameter"),
            EntryKind::BlockParam => write!(f, "block parameter"),
            EntryKind::Signal => write!(f, "signal"),
        }
    }
}

/// A model-wide tunable parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParam {
    pub name: String,
    pub data_type: DataType,
}

/// A parameter scoped to a single block instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockParam {
    /// Full path of the owning block, e.g. `Controller/Gain1`
    pub block_name: String,
    pub param_name: String,
    pub data_type: DataType,
}

/// A signal emitted by a block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub block_name: String,
    pub signal_name: String,
    pub data_type: DataType,
}
