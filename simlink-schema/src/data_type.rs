use std::fmt::Display;

use itertools::Itertools;

/// Memory layout of an element, as reported by the generated C-API.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    #[default]
    Scalar,
    Vector,
    RowMajor,
    ColumnMajor,
    RowMajorNd,
    ColumnMajorNd,
}

impl Orientation {
    /// Returns `true` if `dims` has a shape this orientation can describe.
    ///
    /// A zero extent is never valid. Negative (dynamic) extents are accepted wherever the rank
    /// allows an extent other than 1, so a scalar can never be dynamic.
    pub fn accepts(&self, dims: &Dims) -> bool {
        if dims.iter().any(|&d| d == 0) {
            return false;
        }
        let non_unit = dims.iter().filter(|&&d| d != 1).count();
        match self {
            Orientation::Scalar => dims.len() <= 2 && non_unit == 0,
            Orientation::Vector => matches!(dims.len(), 1 | 2) && non_unit <= 1,
            Orientation::RowMajor | Orientation::ColumnMajor => dims.len() == 2,
            Orientation::RowMajorNd | Orientation::ColumnMajorNd => dims.len() >= 2,
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Orientation::Scalar => "scalar",
            Orientation::Vector => "vector",
            Orientation::RowMajor => "row-major",
            Orientation::ColumnMajor => "column-major",
            Orientation::RowMajorNd => "row-major-nd",
            Orientation::ColumnMajorNd => "column-major-nd",
        };
        f.write_str(s)
    }
}

/// Extents of an element. A negative extent marks a dimension whose size is only known at run
/// time.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Dims(Vec<isize>);

impl Dims {
    pub fn new(dims: impl Into<Vec<isize>>) -> Self {
        Self(dims.into())
    }

    /// Returns `true` if any extent is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.0.iter().any(|&d| d < 0)
    }

    /// Total number of elements.
    ///
    /// Returns `None` if any extent is dynamic or the product does not fit in a `usize`.
    pub fn width(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(usize::try_from(d).ok()?))
    }

    pub fn as_slice(&self) -> &[isize] {
        &self.0
    }
}

impl std::ops::Deref for Dims {
    type Target = [isize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<isize>> for Dims {
    fn from(dims: Vec<isize>) -> Self {
        Self(dims)
    }
}

impl<const N: usize> From<[isize; N]> for Dims {
    fn from(dims: [isize; N]) -> Self {
        Self(dims.to_vec())
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extents = self
            .0
            .iter()
            .map(|&d| if d < 0 { "?".to_string() } else { d.to_string() })
            .join(", ");
        write!(f, "[{extents}]")
    }
}

/// The resolved type of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataType {
    /// The type name used by the generated code, e.g. `real_T`.
    pub native_type: String,
    /// The type name understood by the host environment, e.g. `float64`.
    pub host_type: String,
    pub dims: Dims,
    pub orientation: Orientation,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) {} {}",
            self.native_type, self.host_type, self.dims, self.orientation
        )
    }
}
