//! Centralized error handling for BagVis
//!
//! Only two conditions are fatal to a summary run: the dataset cannot be
//! opened ([`BagVisError::OpenError`]) or it carries no geotransform
//! ([`BagVisError::GeoreferenceError`]). Missing statistics, projection names
//! or valid depth cells degrade into placeholder values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for BagVis operations
#[derive(Debug, Error)]
pub enum BagVisError {
    /// The raster dataset handle could not be obtained
    #[error("Issue in opening the raster file: {}", .path.display())]
    OpenError {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },

    /// The dataset has no usable geotransform
    #[error("Issue in retrieving the geotransform: {reason}")]
    GeoreferenceError { reason: String },

    /// A requested band is missing or could not be read
    #[error("Band {index} could not be read")]
    BandError {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// GDAL errors outside of opening and band access
    #[error("GDAL error: {0}")]
    GdalError(#[from] gdal::errors::GdalError),

    /// Array shape or dimension error
    #[error("Array error: {0}")]
    ArrayError(#[from] ndarray::ShapeError),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Figure layout or rendering errors
    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

impl BagVisError {
    /// Wraps any band access failure with the 1-based band index.
    pub fn band<E>(index: usize, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        BagVisError::BandError {
            index,
            source: source.into(),
        }
    }
}

/// Result type alias for BagVis operations
pub type Result<T> = std::result::Result<T, BagVisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn georeference_error_message() {
        let err = BagVisError::GeoreferenceError {
            reason: "dataset has no geotransform".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Issue in retrieving the geotransform: dataset has no geotransform"
        );
    }

    #[test]
    fn band_error_keeps_source() {
        let err = BagVisError::band(2, "band index out of range");
        assert_eq!(err.to_string(), "Band 2 could not be read");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("band index out of range"));
    }
}
