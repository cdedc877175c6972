//! Defines command-line interface options using `clap` for the BagVis application.

use crate::render::FigureConfig;
use crate::summary::SummaryConfig;
use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for inspecting and plotting bathymetric raster grids
#[derive(Parser, Debug)]
#[command(
    name = "BagVis",
    version,
    about = "Print metadata of a BAG (or any GDAL raster) and plot its depths"
)]
pub struct Args {
    /// Path to the raster file
    #[arg(short, long)]
    pub file: PathBuf,

    /// 1-based index of the elevation band
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub elevation_band: u32,

    /// 1-based index of the uncertainty band
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub uncertainty_band: u32,

    /// Compute min/max from the samples of bands that declare no statistics
    #[arg(long, default_value_t = false)]
    pub compute_missing_stats: bool,

    /// Print the summary as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Save the unannotated depth image (PNG)
    #[arg(long)]
    pub raw_image: Option<PathBuf>,

    /// Save the annotated depth map (PNG)
    #[arg(long)]
    pub figure: Option<PathBuf>,

    /// Distance between gridlines of the annotated map, in map units
    #[arg(long, default_value_t = 5000.0)]
    pub grid_spacing: f64,

    /// Width of the annotated map in pixels
    #[arg(long, default_value_t = 1500)]
    pub figure_width: u32,

    /// Height of the annotated map in pixels
    #[arg(long, default_value_t = 1000)]
    pub figure_height: u32,

    /// TrueType font for map labels. Defaults to a system font.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    pub fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            elevation_band: self.elevation_band as usize,
            uncertainty_band: self.uncertainty_band as usize,
            compute_missing_statistics: self.compute_missing_stats,
        }
    }

    pub fn figure_config(&self) -> FigureConfig {
        FigureConfig {
            width: self.figure_width,
            height: self.figure_height,
            grid_spacing: self.grid_spacing,
            font: self.font.clone(),
            ..FigureConfig::default()
        }
    }
}
