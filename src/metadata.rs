//! Raster band metadata
//!
//! Band statistics are taken as declared by the dataset and never recomputed
//! unless the caller opts in, see [`crate::summary::SummaryConfig`].

use serde::Serialize;
use std::fmt;

/// What a band holds in a bathymetric grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandRole {
    Elevation,
    Uncertainty,
}

impl BandRole {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elevation => "Elevation",
            Self::Uncertainty => "Uncertainty",
        }
    }
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band metadata as declared by the raster container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandMetadata {
    /// GDAL data type name, e.g. `Float32`
    pub data_type: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub nodata: Option<f64>,
    /// Band size as `(cols, rows)`
    pub size: (usize, usize),
}

impl BandMetadata {
    /// True when the container declares both bounds.
    #[must_use]
    pub fn has_statistics(&self) -> bool {
        self.minimum.is_some() && self.maximum.is_some()
    }
}

/// Where the reported min/max of a band come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsOrigin {
    /// Read from the dataset as-is
    Declared,
    /// Computed from the band samples because none were declared
    Computed,
    /// Not declared and not computed
    Unavailable,
}

/// A band of the summary: its role, index and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandInfo {
    /// 1-based band index
    pub index: usize,
    pub role: BandRole,
    #[serde(flatten)]
    pub metadata: BandMetadata,
    pub statistics: StatisticsOrigin,
}

impl BandInfo {
    pub fn new(index: usize, role: BandRole, metadata: BandMetadata) -> Self {
        let statistics = if metadata.has_statistics() {
            StatisticsOrigin::Declared
        } else {
            StatisticsOrigin::Unavailable
        };
        Self {
            index,
            role,
            metadata,
            statistics,
        }
    }
}
