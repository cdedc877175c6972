//! Continuous colormaps for depth rendering.

use crate::statistics::ValueRange;
use image::Rgba;

/// Sampled viridis, evenly spaced from 0 to 1.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 73, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [110, 206, 88],
    [253, 231, 37],
];

/// Fully transparent pixel used for missing cells.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Piecewise linear colormap over evenly spaced stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    stops: Vec<[u8; 3]>,
}

impl Colormap {
    pub fn viridis() -> Self {
        Self {
            stops: VIRIDIS.to_vec(),
        }
    }

    /// Reversed viridis: low values yellow, high values purple, so shallow
    /// water is light and deep water is dark.
    pub fn viridis_r() -> Self {
        Self::viridis().reversed()
    }

    pub fn reversed(mut self) -> Self {
        self.stops.reverse();
        self
    }

    /// Color at `t` in `[0, 1]`; `t` is clamped.
    pub fn at(&self, t: f64) -> Rgba<u8> {
        let last = self.stops.len() - 1;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * last as f64;
        let i = (pos.floor() as usize).min(last.saturating_sub(1));
        let frac = pos - i as f64;
        let (a, b) = (self.stops[i], self.stops[(i + 1).min(last)]);

        let mix = |c1: u8, c2: u8| -> u8 {
            (f64::from(c1) * (1.0 - frac) + f64::from(c2) * frac).round() as u8
        };
        Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255])
    }

    /// Color of `value` within `range`; NaN values are transparent.
    ///
    /// A flat or undefined range maps every valid value to the middle color.
    pub fn color_for(&self, value: f64, range: &ValueRange) -> Rgba<u8> {
        if value.is_nan() {
            return TRANSPARENT;
        }
        self.at(normalize(value, range))
    }
}

/// Position of `value` in `range` as a fraction.
pub fn normalize(value: f64, range: &ValueRange) -> f64 {
    let span = range.span();
    if !range.is_defined() || span <= 0.0 {
        0.5
    } else {
        (value - range.min) / span
    }
}
