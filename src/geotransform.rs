//! Affine georeferencing and raster extent
//!
//! GDAL stores a geotransform as six coefficients
//! `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`
//! mapping pixel `(col, row)` to `(x, y)`:
//!
//! ```text
//! x = origin_x + col * pixel_width + row * row_rotation
//! y = origin_y + col * col_rotation + row * pixel_height
//! ```

use serde::Serialize;

/// The six geotransform coefficients with named fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    #[must_use]
    pub const fn new(
        origin_x: f64,
        pixel_width: f64,
        row_rotation: f64,
        origin_y: f64,
        col_rotation: f64,
        pixel_height: f64,
    ) -> Self {
        Self {
            origin_x,
            pixel_width,
            row_rotation,
            origin_y,
            col_rotation,
            pixel_height,
        }
    }

    /// Coefficients in GDAL order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Coordinates of the top-left corner of the top-left pixel.
    #[must_use]
    pub const fn top_left(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// Grid resolution as `(pixel_width, pixel_height)`; height is negative
    /// for north-up rasters.
    #[must_use]
    pub const fn resolution(&self) -> (f64, f64) {
        (self.pixel_width, self.pixel_height)
    }

    /// True when both rotation terms are zero.
    #[must_use]
    pub fn is_north_up(&self) -> bool {
        self.row_rotation == 0.0 && self.col_rotation == 0.0
    }

    /// Extent covered by a `rows` x `cols` grid.
    ///
    /// Rotation terms are ignored, so the result is only meaningful for
    /// north-up transforms.
    #[must_use]
    pub fn bounding_box(&self, rows: usize, cols: usize) -> BoundingBox {
        BoundingBox {
            min_x: self.origin_x,
            max_x: self.origin_x + cols as f64 * self.pixel_width,
            min_y: self.origin_y + rows as f64 * self.pixel_height,
            max_y: self.origin_y,
        }
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(gt: [f64; 6]) -> Self {
        Self::new(gt[0], gt[1], gt[2], gt[3], gt[4], gt[5])
    }
}

impl From<GeoTransform> for [f64; 6] {
    fn from(gt: GeoTransform) -> Self {
        gt.to_array()
    }
}

/// Geographic rectangle `(min_x, max_x, min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The box as `[min_x, max_x, min_y, max_y]`, the order used for image extents.
    #[must_use]
    pub const fn as_extent(&self) -> [f64; 4] {
        [self.min_x, self.max_x, self.min_y, self.max_y]
    }
}
