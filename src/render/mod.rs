//! Depth map rendering
//!
//! Two views of a summary:
//! - [`render_raw`]: one pixel per cell, viridis (not reversed), missing cells
//!   transparent
//! - [`render_figure`]: the annotated map with geographic gridlines, colorbar
//!   and title
//!
//! Both produce an [`RgbaImage`]; [`save_png`] writes it out.

pub mod colormap;
pub mod figure;
pub mod text;

pub use colormap::Colormap;
pub use figure::{render_figure, FigureConfig, PlotArea};
pub use text::TextPainter;

use crate::depth::DepthArray;
use crate::errors::{BagVisError, Result};
use crate::statistics::ValueRange;
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::info;

/// Unannotated image of the depth grid, one pixel per cell.
///
/// # Errors
///
/// [`BagVisError::RenderError`] for an empty grid.
pub fn render_raw(depth: &DepthArray, range: &ValueRange) -> Result<RgbaImage> {
    let (rows, cols) = depth.shape();
    if rows == 0 || cols == 0 {
        return Err(BagVisError::RenderError {
            message: "depth grid is empty".to_string(),
        });
    }
    let (width, height) = (
        u32::try_from(cols).map_err(|_| too_large(rows, cols))?,
        u32::try_from(rows).map_err(|_| too_large(rows, cols))?,
    );

    let colormap = Colormap::viridis();
    let view = depth.view();
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        colormap.color_for(view[[y as usize, x as usize]], range)
    }))
}

fn too_large(rows: usize, cols: usize) -> BagVisError {
    BagVisError::RenderError {
        message: format!("depth grid {rows}x{cols} is too large for an image"),
    }
}

/// Writes `img` as PNG, whatever the extension of `path`.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    info!(
        "Saved {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}
