//! The loader-facing description of one model's metadata tables.
//!
//! A [`MapTable`] is what an external walker produces after reading the generated C-API tables:
//! one [`ElementRecord`] per discovered parameter, block parameter or signal, with the native type
//! name and shape exactly as the generator reported them. Referenced child models carry their own
//! table in [`MapTable::children`].

use crate::{Dims, Orientation};

/// One discovered element, before its host type has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementRecord {
    /// Owning block path. Required for block parameters and signals, ignored for model parameters.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub block_name: Option<String>,
    pub name: String,
    pub native_type: String,
    #[cfg_attr(feature = "serde", serde(default = "default_dims"))]
    pub dims: Dims,
    #[cfg_attr(feature = "serde", serde(default))]
    pub orientation: Orientation,
}

/// Shape the generator reports for a scalar.
fn default_dims() -> Dims {
    Dims::new([1, 1])
}

impl ElementRecord {
    /// A scalar element with no owning block.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            block_name: None,
            name: name.into(),
            native_type: native_type.into(),
            dims: default_dims(),
            orientation: Orientation::Scalar,
        }
    }

    pub fn in_block(mut self, block_name: impl Into<String>) -> Self {
        self.block_name = Some(block_name.into());
        self
    }

    pub fn with_shape(mut self, dims: impl Into<Dims>, orientation: Orientation) -> Self {
        self.dims = dims.into();
        self.orientation = orientation;
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapTable {
    pub model_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub model_params: Vec<ElementRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_params: Vec<ElementRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub signals: Vec<ElementRecord>,
    /// Tables of referenced child models
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<MapTable>,
}

impl MapTable {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// Returns this table followed by every nested child table, depth first.
    pub fn walk(&self) -> impl Iterator<Item = &MapTable> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let table = stack.pop()?;
            stack.extend(table.children.iter().rev());
            Some(table)
        })
    }
}

#[cfg(feature = "serde")]
impl std::str::FromStr for MapTable {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::deserialize(s)
    }
}
