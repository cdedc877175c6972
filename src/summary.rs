//! Raster summarization
//!
//! [`summarize`] turns an open raster into a [`Summary`]: georeferencing,
//! band metadata, the depth grid derived from the elevation band, its depth
//! range, the geographic extent and the projection.

use crate::depth::DepthArray;
use crate::errors::{BagVisError, Result};
use crate::geotransform::{BoundingBox, GeoTransform};
use crate::metadata::{BandInfo, BandRole, StatisticsOrigin};
use crate::projection::ProjectionInfo;
use crate::source::RasterSource;
use crate::statistics::{StatOperation, ValueRange};
use ndarray::Array2;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Options of a summary run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// 1-based index of the elevation band
    pub elevation_band: usize,
    /// 1-based index of the uncertainty band
    pub uncertainty_band: usize,
    /// Compute min/max from the samples of bands that declare none
    pub compute_missing_statistics: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            elevation_band: 1,
            uncertainty_band: 2,
            compute_missing_statistics: false,
        }
    }
}

/// Everything known about a raster after one summary run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub source: String,
    pub geotransform: GeoTransform,
    /// Elevation band first, then uncertainty
    pub bands: [BandInfo; 2],
    #[serde(skip)]
    pub depth: DepthArray,
    pub depth_range: ValueRange,
    /// Number of depth cells holding a value
    pub valid_cells: usize,
    /// `(rows, cols)` of the depth grid
    pub shape: (usize, usize),
    pub bbox: BoundingBox,
    pub projection: ProjectionInfo,
}

impl Summary {
    pub fn elevation(&self) -> &BandInfo {
        &self.bands[0]
    }

    pub fn uncertainty(&self) -> &BandInfo {
        &self.bands[1]
    }
}

/// Summarizes an open raster.
///
/// Band statistics are taken as declared. A band without declared min/max is
/// reported as unavailable unless `config.compute_missing_statistics` is set.
///
/// # Errors
///
/// - [`BagVisError::GeoreferenceError`] if the raster has no geotransform
/// - [`BagVisError::BandError`] if either band is missing or unreadable
pub fn summarize<S>(source: &S, config: &SummaryConfig) -> Result<Summary>
where
    S: RasterSource + ?Sized,
{
    let description = source.description();

    let geotransform = source
        .geo_transform()
        .ok_or_else(|| BagVisError::GeoreferenceError {
            reason: format!("{description} has no geotransform"),
        })?;
    debug!("Geotransform: {:?}", geotransform.to_array());

    let mut elevation = band_info(source, config.elevation_band, BandRole::Elevation)?;
    let mut uncertainty = band_info(source, config.uncertainty_band, BandRole::Uncertainty)?;

    let raw_elevation = source.read_band(config.elevation_band)?;
    if config.compute_missing_statistics {
        fill_missing_statistics(&mut elevation, &raw_elevation);
        if uncertainty.statistics == StatisticsOrigin::Unavailable {
            let raw_uncertainty = source.read_band(config.uncertainty_band)?;
            fill_missing_statistics(&mut uncertainty, &raw_uncertainty);
        }
    }

    let depth = DepthArray::from_elevation(raw_elevation.view(), elevation.metadata.nodata);
    let depth_range = depth.range();
    let valid_cells = depth.valid_cells();
    if !depth_range.is_defined() {
        warn!("Elevation band of {description} holds no valid samples");
    }

    if !geotransform.is_north_up() {
        warn!(
            "Geotransform of {description} is rotated; the extent ignores rotation terms"
        );
    }
    let (rows, cols) = depth.shape();
    let bbox = geotransform.bounding_box(rows, cols);

    let projection = ProjectionInfo::from_wkt(source.projection_wkt());
    if projection.name.is_empty() {
        debug!("No projected CRS name for {description}");
    }

    info!(
        "Summarized {description}: {rows}x{cols} cells, {valid_cells} with depth values"
    );

    Ok(Summary {
        source: description,
        geotransform,
        bands: [elevation, uncertainty],
        depth,
        depth_range,
        valid_cells,
        shape: (rows, cols),
        bbox,
        projection,
    })
}

fn band_info<S>(source: &S, index: usize, role: BandRole) -> Result<BandInfo>
where
    S: RasterSource + ?Sized,
{
    let metadata = source.band_metadata(index)?;
    let info = BandInfo::new(index, role, metadata);
    debug!(
        "{role} band {index}: type {}, nodata {:?}",
        info.metadata.data_type, info.metadata.nodata
    );
    if info.statistics == StatisticsOrigin::Unavailable {
        warn!("{role} band {index} declares no min/max statistics");
    }
    Ok(info)
}

/// Fills the bounds a band does not declare from its samples, nodata masked.
fn fill_missing_statistics(band: &mut BandInfo, samples: &Array2<f64>) {
    if band.statistics != StatisticsOrigin::Unavailable {
        return;
    }
    let nodata = band.metadata.nodata;
    if band.metadata.minimum.is_none() {
        band.metadata.minimum = Some(StatOperation::Min.reduce(valid_samples(samples, nodata)));
    }
    if band.metadata.maximum.is_none() {
        band.metadata.maximum = Some(StatOperation::Max.reduce(valid_samples(samples, nodata)));
    }
    band.statistics = StatisticsOrigin::Computed;
    debug!(
        "Computed {} band statistics: {} {:?}, {} {:?}",
        band.role,
        StatOperation::Min.as_str(),
        band.metadata.minimum,
        StatOperation::Max.as_str(),
        band.metadata.maximum
    );
}

fn valid_samples(
    samples: &Array2<f64>,
    nodata: Option<f64>,
) -> impl Iterator<Item = f64> + '_ {
    samples.iter().copied().filter(move |&x| Some(x) != nodata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryBand, InMemoryRaster};
    use ndarray::array;

    #[test]
    fn computes_only_missing_bounds() {
        let raster = InMemoryRaster::new("partial")
            .with_geo_transform([0.0, 1.0, 0.0, 2.0, 0.0, -1.0])
            .with_band(InMemoryBand::new(array![[1.0, 5.0], [-3.0, 99.0]]).with_nodata(99.0))
            .with_band(InMemoryBand::new(array![[0.5, 0.2], [0.1, 0.3]]));

        let config = SummaryConfig {
            compute_missing_statistics: true,
            ..SummaryConfig::default()
        };
        let summary = summarize(&raster, &config).unwrap();

        let elevation = summary.elevation();
        assert_eq!(elevation.statistics, StatisticsOrigin::Computed);
        assert_eq!(elevation.metadata.minimum, Some(-3.0));
        assert_eq!(elevation.metadata.maximum, Some(5.0));

        let uncertainty = summary.uncertainty();
        assert_eq!(uncertainty.metadata.minimum, Some(0.1));
        assert_eq!(uncertainty.metadata.maximum, Some(0.5));
    }

    #[test]
    fn declared_bounds_are_not_overwritten() {
        let raster = InMemoryRaster::new("declared")
            .with_geo_transform([0.0, 1.0, 0.0, 1.0, 0.0, -1.0])
            .with_band(InMemoryBand::new(array![[1.0]]).with_statistics(-100.0, 100.0))
            .with_band(InMemoryBand::new(array![[0.5]]).with_statistics(0.0, 9.0));

        let config = SummaryConfig {
            compute_missing_statistics: true,
            ..SummaryConfig::default()
        };
        let summary = summarize(&raster, &config).unwrap();
        assert_eq!(summary.elevation().statistics, StatisticsOrigin::Declared);
        assert_eq!(summary.elevation().metadata.minimum, Some(-100.0));
        assert_eq!(summary.uncertainty().metadata.maximum, Some(9.0));
    }
}
