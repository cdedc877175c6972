//! NaN-aware reductions over raster samples
//!
//! Missing cells are represented as NaN and never take part in a reduction.
//! When every cell is missing the result is NaN rather than an error.

use ndarray::{ArrayBase, Data, Dimension};
use serde::Serialize;

/// Supported reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOperation {
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl StatOperation {
    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "minimum",
            Self::Max => "maximum",
        }
    }

    /// Fold `values`, skipping NaN. Returns NaN if nothing was folded.
    pub fn reduce<I>(self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let folded = values
            .into_iter()
            .filter(|x| !x.is_nan())
            .fold(None, |acc: Option<f64>, x| {
                Some(match (self, acc) {
                    (_, None) => x,
                    (Self::Min, Some(a)) => a.min(x),
                    (Self::Max, Some(a)) => a.max(x),
                })
            });
        folded.unwrap_or(f64::NAN)
    }
}

/// Minimum and maximum of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range with both bounds undefined.
    pub const UNDEFINED: Self = Self {
        min: f64::NAN,
        max: f64::NAN,
    };

    /// Single pass min/max over an array, ignoring NaN.
    pub fn of_array<S, D>(array: &ArrayBase<S, D>) -> Self
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        array
            .iter()
            .copied()
            .filter(|x| !x.is_nan())
            .fold(None, |acc: Option<Self>, x| {
                Some(match acc {
                    None => Self { min: x, max: x },
                    Some(r) => Self {
                        min: r.min.min(x),
                        max: r.max.max(x),
                    },
                })
            })
            .unwrap_or(Self::UNDEFINED)
    }

    /// False when the data had no valid samples.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !self.min.is_nan() && !self.max.is_nan()
    }

    /// Extent of the range; NaN when undefined.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Number of non-NaN samples in an array.
pub fn valid_count<S, D>(array: &ArrayBase<S, D>) -> usize
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    array.iter().filter(|x| !x.is_nan()).count()
}
