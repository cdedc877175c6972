//! Annotated depth map: raster in geographic coordinates with gridlines,
//! tick labels, a colorbar and a title.

use super::colormap::{normalize, Colormap};
use super::text::TextPainter;
use crate::errors::{BagVisError, Result};
use crate::geotransform::BoundingBox;
use crate::summary::Summary;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MARGIN_LEFT: i64 = 130;
const MARGIN_RIGHT: i64 = 190;
const MARGIN_TOP: i64 = 90;
const MARGIN_BOTTOM: i64 = 90;
const COLORBAR_GAP: i32 = 30;
const COLORBAR_WIDTH: u32 = 25;
/// Upper bound on gridlines per axis; denser requests are thinned.
const MAX_TICKS: usize = 100;
/// 2^53: above this, consecutive integers are not all representable as f64.
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRID: Rgba<u8> = Rgba([176, 176, 176, 255]);

/// Layout and labeling of the annotated figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    /// Distance between gridlines, in map units
    pub grid_spacing: f64,
    /// TrueType font for labels; system fonts are tried when unset
    pub font: Option<PathBuf>,
    pub colorbar_label: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            grid_spacing: 5000.0,
            font: None,
            colorbar_label: "Bathymetry [meter]".to_string(),
            x_label: "Easting".to_string(),
            y_label: "Northing".to_string(),
        }
    }
}

/// Where the raster lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x0: i32,
    pub y0: i32,
    pub width: u32,
    pub height: u32,
    /// Pixels per map unit, equal on both axes
    pub scale: f64,
    pub bbox: BoundingBox,
}

impl PlotArea {
    /// Largest area with the extent's aspect ratio inside the canvas margins.
    pub fn fit(bbox: BoundingBox, canvas_width: u32, canvas_height: u32) -> Result<Self> {
        let avail_w = i64::from(canvas_width) - MARGIN_LEFT - MARGIN_RIGHT;
        let avail_h = i64::from(canvas_height) - MARGIN_TOP - MARGIN_BOTTOM;
        if avail_w < 10 || avail_h < 10 {
            return Err(BagVisError::RenderError {
                message: format!("figure size {canvas_width}x{canvas_height} is too small"),
            });
        }

        let (bw, bh) = (bbox.width(), bbox.height());
        if !(bw.is_finite() && bh.is_finite() && bw > 0.0 && bh > 0.0) {
            return Err(BagVisError::RenderError {
                message: format!("cannot plot a degenerate extent {:?}", bbox.as_extent()),
            });
        }

        let scale = (avail_w as f64 / bw).min(avail_h as f64 / bh);
        let width = ((bw * scale).round() as i64).clamp(1, avail_w);
        let height = ((bh * scale).round() as i64).clamp(1, avail_h);
        Ok(Self {
            x0: (MARGIN_LEFT + (avail_w - width) / 2) as i32,
            y0: (MARGIN_TOP + (avail_h - height) / 2) as i32,
            width: width as u32,
            height: height as u32,
            scale,
            bbox,
        })
    }

    pub fn x_to_px(&self, x: f64) -> f32 {
        (f64::from(self.x0) + (x - self.bbox.min_x) * self.scale) as f32
    }

    pub fn y_to_px(&self, y: f64) -> f32 {
        (f64::from(self.y0) + (self.bbox.max_y - y) * self.scale) as f32
    }

    fn right(&self) -> i32 {
        self.x0 + self.width as i32
    }

    fn bottom(&self) -> i32 {
        self.y0 + self.height as i32
    }
}

/// Multiples of `step` within `[min, max]`, thinned to at most `MAX_TICKS`.
///
/// Empty when the multiples cannot be told apart as `f64`, which happens
/// for a step that is tiny relative to the coordinates.
pub fn grid_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && min.is_finite() && max.is_finite()) || min > max {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    if !(first.abs() <= MAX_EXACT_INDEX && last.abs() <= MAX_EXACT_INDEX) || last < first {
        debug!("No gridlines for step {step} over [{min}, {max}]");
        return Vec::new();
    }
    let count = last - first + 1.0;
    let stride = (count / MAX_TICKS as f64).ceil().max(1.0);
    let start = (first / stride).ceil() * stride;
    if start > last {
        return Vec::new();
    }
    let steps = ((last - start) / stride).floor() as usize;
    (0..=steps)
        .map(|i| (start + i as f64 * stride) * step)
        .collect()
}

/// A round step (1, 2 or 5 times a power of ten) giving about `target`
/// intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick label with as many decimals as the step needs, at most three.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..3)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(3) as usize;
    let text = format!("{value:.decimals$}");
    // avoid "-0"
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

fn figure_title(summary: &Summary) -> (String, String) {
    let file_name = Path::new(&summary.source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary.source.clone());
    (file_name, format!("Projection: {}", summary.projection.name))
}

/// Renders the annotated depth map of `summary`.
///
/// # Errors
///
/// [`BagVisError::RenderError`] when the canvas is too small or the extent is
/// empty; I/O or font errors when `config.font` cannot be loaded.
pub fn render_figure(summary: &Summary, config: &FigureConfig) -> Result<RgbaImage> {
    let area = PlotArea::fit(summary.bbox, config.width, config.height)?;
    let text = TextPainter::load(config.font.as_deref())?;
    if text.is_none() {
        warn!("No usable font found; rendering the figure without labels");
    }
    debug!("Plot area: {:?}", area);

    let colormap = Colormap::viridis_r();
    let mut img = RgbaImage::from_pixel(config.width, config.height, WHITE);

    draw_raster(&mut img, summary, &area, &colormap);
    draw_grid(&mut img, &area, config.grid_spacing, text.as_ref());
    draw_hollow_rect_mut(
        &mut img,
        Rect::at(area.x0, area.y0).of_size(area.width, area.height),
        BLACK,
    );
    draw_colorbar(&mut img, summary, &area, &colormap, config, text.as_ref());

    if let Some(text) = &text {
        let (title, subtitle) = figure_title(summary);
        let cx = (config.width / 2) as i32;
        text.draw_centered(&mut img, &title, cx, 15, 26.0, BLACK);
        text.draw_centered(&mut img, &subtitle, cx, 48, 22.0, BLACK);

        let plot_cx = area.x0 + area.width as i32 / 2;
        let plot_cy = area.y0 + area.height as i32 / 2;
        text.draw_centered(&mut img, &config.x_label, plot_cx, area.bottom() + 38, 20.0, BLACK);
        text.draw_vertical(&mut img, &config.y_label, 22, plot_cy, 20.0, BLACK);
    }

    Ok(img)
}

/// Nearest-neighbour resampling of the depth grid into the plot area.
fn draw_raster(img: &mut RgbaImage, summary: &Summary, area: &PlotArea, colormap: &Colormap) {
    let depth = &summary.depth;
    let (rows, cols) = depth.shape();
    if rows == 0 || cols == 0 {
        return;
    }
    for py in 0..area.height {
        let row = (((f64::from(py) + 0.5) / f64::from(area.height)) * rows as f64) as usize;
        for px in 0..area.width {
            let col = (((f64::from(px) + 0.5) / f64::from(area.width)) * cols as f64) as usize;
            let value = depth.get(row.min(rows - 1), col.min(cols - 1)).unwrap_or(f64::NAN);
            let color = colormap.color_for(value, &summary.depth_range);
            if color[3] > 0 {
                img.put_pixel(area.x0 as u32 + px, area.y0 as u32 + py, color);
            }
        }
    }
}

fn draw_grid(img: &mut RgbaImage, area: &PlotArea, spacing: f64, text: Option<&TextPainter>) {
    let bbox = area.bbox;
    let (top, bottom) = (area.y0 as f32, area.bottom() as f32);
    let (left, right) = (area.x0 as f32, area.right() as f32);

    for x in grid_ticks(bbox.min_x, bbox.max_x, spacing) {
        let px = area.x_to_px(x);
        draw_line_segment_mut(img, (px, top), (px, bottom), GRID);
        if let Some(text) = text {
            let label = format_tick(x, spacing);
            text.draw_centered(img, &label, px as i32, area.bottom() + 8, 16.0, BLACK);
        }
    }
    for y in grid_ticks(bbox.min_y, bbox.max_y, spacing) {
        let py = area.y_to_px(y);
        draw_line_segment_mut(img, (left, py), (right, py), GRID);
        if let Some(text) = text {
            let label = format_tick(y, spacing);
            text.draw_right_aligned(img, &label, area.x0 - 8, py as i32, 16.0, BLACK);
        }
    }
}

fn draw_colorbar(
    img: &mut RgbaImage,
    summary: &Summary,
    area: &PlotArea,
    colormap: &Colormap,
    config: &FigureConfig,
    text: Option<&TextPainter>,
) {
    let x = area.right() + COLORBAR_GAP;
    let height = area.height;
    for i in 0..height {
        let t = if height > 1 {
            1.0 - f64::from(i) / f64::from(height - 1)
        } else {
            1.0
        };
        draw_filled_rect_mut(
            img,
            Rect::at(x, area.y0 + i as i32).of_size(COLORBAR_WIDTH, 1),
            colormap.at(t),
        );
    }
    draw_hollow_rect_mut(img, Rect::at(x, area.y0).of_size(COLORBAR_WIDTH, height), BLACK);

    let range = summary.depth_range;
    let tick_x = x + COLORBAR_WIDTH as i32;
    let mut widest = 0;
    if range.is_defined() {
        let step = nice_step(range.span(), 6);
        for value in grid_ticks(range.min, range.max, step) {
            let t = normalize(value, &range);
            let py = area.y0 as f32 + ((1.0 - t) * f64::from(height.saturating_sub(1))) as f32;
            draw_line_segment_mut(img, (tick_x as f32, py), (tick_x as f32 + 5.0, py), BLACK);
            if let Some(text) = text {
                let label = format_tick(value, step);
                let (w, h) = text.size(&label, 16.0);
                widest = widest.max(w);
                text.draw(img, &label, tick_x + 9, py as i32 - h / 2, 16.0, BLACK);
            }
        }
    }

    if let Some(text) = text {
        let cx = tick_x + 9 + widest + 16;
        let cy = area.y0 + height as i32 / 2;
        text.draw_vertical(img, &config.colorbar_label, cx, cy, 18.0, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_multiples_of_spacing() {
        assert_eq!(
            grid_ticks(498_200.0, 512_900.0, 5000.0),
            vec![500_000.0, 505_000.0, 510_000.0]
        );
        assert_eq!(grid_ticks(-12.0, 3.0, 5.0), vec![-10.0, -5.0, 0.0]);
        assert!(grid_ticks(1.0, 4.0, 5.0).is_empty());
        assert!(grid_ticks(0.0, 10.0, 0.0).is_empty());
        assert!(grid_ticks(f64::NAN, 10.0, 1.0).is_empty());
    }

    #[test]
    fn dense_ticks_are_thinned() {
        let ticks = grid_ticks(0.0, 1000.0, 1.0);
        assert!(ticks.len() <= MAX_TICKS);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn tiny_spacing_does_not_overflow() {
        assert!(grid_ticks(-180.0, 180.0, 1e-17).is_empty());
        assert!(grid_ticks(500_000.0, 500_300.0, f64::MIN_POSITIVE).is_empty());

        let ticks = grid_ticks(-180.0, 180.0, 1e-10);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_TICKS);
        assert!(ticks.iter().all(|t| (-180.000_001..=180.000_001).contains(t)));
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(30.0, 6), 5.0);
        assert_eq!(nice_step(100.0, 6), 20.0);
        assert_eq!(nice_step(7.0, 6), 2.0);
        assert_eq!(nice_step(0.0, 6), 1.0);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(505_000.0, 5000.0), "505000");
        assert_eq!(format_tick(2.5, 0.5), "2.5");
        assert_eq!(format_tick(-0.0, 5.0), "0");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
    }

    #[test]
    fn plot_area_keeps_aspect_ratio() {
        let bbox = BoundingBox {
            min_x: 0.0,
            max_x: 2000.0,
            min_y: 0.0,
            max_y: 1000.0,
        };
        let area = PlotArea::fit(bbox, 1500, 1000).unwrap();
        let ratio = f64::from(area.width) / f64::from(area.height);
        assert!((ratio - 2.0).abs() < 0.01, "{area:?}");
        assert_eq!(area.x_to_px(0.0), area.x0 as f32);
        assert_eq!(area.y_to_px(1000.0), area.y0 as f32);
    }

    #[test]
    fn degenerate_layouts_are_errors() {
        let bbox = BoundingBox {
            min_x: 5.0,
            max_x: 5.0,
            min_y: 0.0,
            max_y: 1.0,
        };
        assert!(matches!(
            PlotArea::fit(bbox, 1500, 1000),
            Err(BagVisError::RenderError { .. })
        ));
        let ok = BoundingBox { max_x: 6.0, ..bbox };
        assert!(PlotArea::fit(ok, 200, 200).is_err());
    }
}
