//! GDAL-backed raster access
//!
//! [`GdalRaster`] owns the dataset handle for the whole run. GDAL closes the
//! dataset when the handle is dropped, so the file is released on every exit
//! path, including early returns through `?`.

use crate::errors::{BagVisError, Result};
use crate::geotransform::GeoTransform;
use crate::metadata::BandMetadata;
use crate::source::RasterSource;
use gdal::raster::RasterBand;
use gdal::Dataset;
use ndarray::Array2;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An open, read-only GDAL dataset.
pub struct GdalRaster {
    path: PathBuf,
    dataset: Dataset,
}

impl GdalRaster {
    /// Opens `path` read-only.
    ///
    /// # Errors
    ///
    /// [`BagVisError::OpenError`] when GDAL cannot open the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = Dataset::open(&path).map_err(|source| BagVisError::OpenError {
            path: path.clone(),
            source,
        })?;
        info!("Raster file was successfully opened: {}", path.display());
        Ok(Self { path, dataset })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn rasterband(&self, index: usize) -> Result<RasterBand<'_>> {
        let count = self.band_count();
        if index == 0 || index > count {
            return Err(BagVisError::band(
                index,
                format!("{} has {count} band(s)", self.path.display()),
            ));
        }
        self.dataset
            .rasterband(index)
            .map_err(|e| BagVisError::band(index, e))
    }
}

impl Drop for GdalRaster {
    fn drop(&mut self) {
        debug!("Closing raster file: {}", self.path.display());
    }
}

/// Declared minimum and maximum of a band, `None` where the driver has none.
///
/// GDAL falls back to the data type's range when nothing is declared and
/// flags it through `pbSuccess`; those fallbacks are discarded here.
fn declared_bounds(band: &RasterBand<'_>) -> (Option<f64>, Option<f64>) {
    let mut has_min: c_int = 0;
    let mut has_max: c_int = 0;
    // SAFETY: the band handle is valid while `band` borrows the dataset, and
    // both calls only write to the provided success flags.
    let (min, max) = unsafe {
        let handle = band.c_rasterband();
        (
            gdal_sys::GDALGetRasterMinimum(handle, &mut has_min),
            gdal_sys::GDALGetRasterMaximum(handle, &mut has_max),
        )
    };
    (
        (has_min != 0).then_some(min),
        (has_max != 0).then_some(max),
    )
}

impl RasterSource for GdalRaster {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn raster_size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    fn band_count(&self) -> usize {
        self.dataset.raster_count()
    }

    fn geo_transform(&self) -> Option<GeoTransform> {
        match self.dataset.geo_transform() {
            Ok(gt) => Some(GeoTransform::from(gt)),
            Err(e) => {
                debug!("No geotransform for {}: {e}", self.path.display());
                None
            }
        }
    }

    fn projection_wkt(&self) -> String {
        self.dataset.projection()
    }

    fn band_metadata(&self, index: usize) -> Result<BandMetadata> {
        let band = self.rasterband(index)?;
        let (minimum, maximum) = declared_bounds(&band);
        Ok(BandMetadata {
            data_type: band.band_type().name(),
            minimum,
            maximum,
            nodata: band.no_data_value(),
            size: band.size(),
        })
    }

    fn read_band(&self, index: usize) -> Result<Array2<f64>> {
        let band = self.rasterband(index)?;
        debug!("Reading band {index} of {}", self.path.display());
        band.read_band_as::<f64>()
            .and_then(|buffer| buffer.to_array())
            .map_err(|e| BagVisError::band(index, e))
    }
}
