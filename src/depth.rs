//! Elevation to depth conversion
//!
//! BAG elevation grids store heights (positive up). Depth flips the sign and
//! marks cells holding the nodata sentinel as NaN.

use crate::statistics::{valid_count, ValueRange};
use ndarray::{Array2, ArrayView2};

/// Depth grid derived from an elevation band, shape `(rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthArray {
    data: Array2<f64>,
}

impl DepthArray {
    /// Builds a new depth grid; `elevation` is left unchanged.
    ///
    /// Cells equal to `nodata` become NaN, every other cell is negated. With no
    /// sentinel declared, only the sign is flipped.
    pub fn from_elevation(elevation: ArrayView2<'_, f64>, nodata: Option<f64>) -> Self {
        let data = elevation.mapv(|h| match nodata {
            Some(sentinel) if h == sentinel => f64::NAN,
            _ => -h,
        });
        Self { data }
    }

    /// Wraps an already converted depth grid.
    pub fn from_depths(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Min/max depth over valid cells; NaN/NaN when every cell is missing.
    pub fn range(&self) -> ValueRange {
        ValueRange::of_array(&self.data)
    }

    /// Number of cells carrying a depth value.
    pub fn valid_cells(&self) -> usize {
        valid_count(&self.data)
    }

    /// Depth at `(row, col)`, `None` outside the grid. Missing cells are NaN.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }
}
