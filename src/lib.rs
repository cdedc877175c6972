//! BagVis: bathymetric raster inspection and plotting
//!
//! A Rust library and CLI for summarizing georeferenced bathymetric grids
//! such as BAG files. BagVis opens a raster through GDAL, reports its
//! georeferencing, band metadata and projection, converts the elevation band
//! into depths and renders depth maps.
//!
//! ## Key Features
//!
//! - **Metadata Inspection**: geotransform, corner coordinates, resolution,
//!   band data types, declared statistics and nodata values
//! - **Depth Conversion**: nodata masking and sign inversion of elevations
//! - **Extent Computation**: geographic bounding box from the geotransform
//! - **Projection Lookup**: projected CRS name from the dataset's WKT
//! - **Rendering**: raw depth image and an annotated map with gridlines and colorbar
//!
//! ## Module Organization
//!
//! - [`summary`]: the summarizer and its output
//! - [`source`]: raster access abstraction and an in-memory raster
//! - [`gdal_io`]: GDAL-backed raster access
//! - [`geotransform`]: geotransform and bounding box
//! - [`depth`]: elevation to depth conversion
//! - [`statistics`]: NaN-aware reductions
//! - [`metadata`]: band metadata
//! - [`projection`]: WKT lookup
//! - [`report`]: text and JSON report
//! - [`render`]: colormaps and figures
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bag_vis::prelude::*;
//!
//! let raster = GdalRaster::open("H11560_LI_3m_MLLW_1of1.bag").unwrap();
//! let summary = summarize(&raster, &SummaryConfig::default()).unwrap();
//! println!("{}", Report::new(&summary));
//! ```

pub mod cli;
pub mod depth;
pub mod errors;
pub mod gdal_io;
pub mod geotransform;
pub mod metadata;
pub mod projection;
pub mod render;
pub mod report;
pub mod source;
pub mod statistics;
pub mod summary;

pub use errors::{BagVisError, Result};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::depth::DepthArray;
    pub use crate::errors::{BagVisError, Result};
    pub use crate::gdal_io::GdalRaster;
    pub use crate::geotransform::{BoundingBox, GeoTransform};
    pub use crate::metadata::{BandInfo, BandMetadata, BandRole, StatisticsOrigin};
    pub use crate::projection::ProjectionInfo;
    pub use crate::render::{render_figure, render_raw, save_png, FigureConfig};
    pub use crate::report::Report;
    pub use crate::source::{InMemoryBand, InMemoryRaster, RasterSource};
    pub use crate::statistics::ValueRange;
    pub use crate::summary::{summarize, Summary, SummaryConfig};
}
