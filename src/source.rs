//! Raster source abstraction
//!
//! The summarizer only needs a handful of read operations from a raster
//! container. [`RasterSource`] captures them so the same pipeline runs over a
//! GDAL dataset ([`crate::gdal_io::GdalRaster`]) or grids already held in
//! memory ([`InMemoryRaster`]).

use crate::errors::{BagVisError, Result};
use crate::geotransform::GeoTransform;
use crate::metadata::BandMetadata;
use ndarray::Array2;

/// Read access to a georeferenced raster. Band indices are 1-based.
pub trait RasterSource {
    /// Human-readable origin of the data, usually the file path.
    fn description(&self) -> String;

    /// Raster size as `(cols, rows)`.
    fn raster_size(&self) -> (usize, usize);

    fn band_count(&self) -> usize;

    /// `None` when the dataset is not georeferenced.
    fn geo_transform(&self) -> Option<GeoTransform>;

    /// Projection as WKT; empty when the dataset declares none.
    fn projection_wkt(&self) -> String;

    /// Declared metadata of a band.
    fn band_metadata(&self, index: usize) -> Result<BandMetadata>;

    /// All samples of a band as `(rows, cols)`.
    fn read_band(&self, index: usize) -> Result<Array2<f64>>;
}

/// A band held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryBand {
    pub data: Array2<f64>,
    pub data_type: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub nodata: Option<f64>,
}

impl InMemoryBand {
    /// A `Float64` band without declared statistics or nodata.
    pub fn new(data: Array2<f64>) -> Self {
        Self {
            data,
            data_type: "Float64".to_string(),
            minimum: None,
            maximum: None,
            nodata: None,
        }
    }

    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn with_statistics(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }
}

/// A raster assembled from in-memory grids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRaster {
    description: String,
    geo_transform: Option<GeoTransform>,
    projection: String,
    bands: Vec<InMemoryBand>,
}

impl InMemoryRaster {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_geo_transform(mut self, geo_transform: impl Into<GeoTransform>) -> Self {
        self.geo_transform = Some(geo_transform.into());
        self
    }

    pub fn with_projection(mut self, wkt: impl Into<String>) -> Self {
        self.projection = wkt.into();
        self
    }

    pub fn with_band(mut self, band: InMemoryBand) -> Self {
        self.bands.push(band);
        self
    }

    fn band(&self, index: usize) -> Result<&InMemoryBand> {
        index
            .checked_sub(1)
            .and_then(|i| self.bands.get(i))
            .ok_or_else(|| {
                BagVisError::band(
                    index,
                    format!("raster has {} band(s)", self.bands.len()),
                )
            })
    }
}

impl RasterSource for InMemoryRaster {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn raster_size(&self) -> (usize, usize) {
        self.bands
            .first()
            .map(|b| (b.data.ncols(), b.data.nrows()))
            .unwrap_or((0, 0))
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn geo_transform(&self) -> Option<GeoTransform> {
        self.geo_transform
    }

    fn projection_wkt(&self) -> String {
        self.projection.clone()
    }

    fn band_metadata(&self, index: usize) -> Result<BandMetadata> {
        let band = self.band(index)?;
        Ok(BandMetadata {
            data_type: band.data_type.clone(),
            minimum: band.minimum,
            maximum: band.maximum,
            nodata: band.nodata,
            size: (band.data.ncols(), band.data.nrows()),
        })
    }

    fn read_band(&self, index: usize) -> Result<Array2<f64>> {
        Ok(self.band(index)?.data.clone())
    }
}
