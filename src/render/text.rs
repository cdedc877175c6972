//! Text drawing for figure annotations.
//!
//! No font is bundled. The figure uses the font given on the command line or
//! the first one found in common system locations.

use crate::errors::{BagVisError, Result};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use std::path::{Path, PathBuf};
use tracing::debug;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Draws text with one TrueType font.
pub struct TextPainter {
    font: Font<'static>,
}

impl TextPainter {
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font })
    }

    /// Loads `path` if given, else the first readable system font.
    ///
    /// # Errors
    ///
    /// Only an explicitly requested font that cannot be read or parsed is an
    /// error; a missing system font yields `Ok(None)`.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = path {
            let bytes = std::fs::read(path)?;
            return Self::from_bytes(bytes).map(Some).ok_or_else(|| BagVisError::RenderError {
                message: format!("{} is not a usable TrueType font", path.display()),
            });
        }

        for candidate in SYSTEM_FONTS.iter().map(PathBuf::from) {
            if let Ok(bytes) = std::fs::read(&candidate) {
                if let Some(painter) = Self::from_bytes(bytes) {
                    debug!("Using font {}", candidate.display());
                    return Ok(Some(painter));
                }
            }
        }
        Ok(None)
    }

    /// Width and height of `text` at `px` pixels.
    pub fn size(&self, text: &str, px: f32) -> (i32, i32) {
        text_size(Scale::uniform(px), &self.font, text)
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, img: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba<u8>) {
        draw_text_mut(img, color, x, y, Scale::uniform(px), &self.font, text);
    }

    /// Draws `text` horizontally centered on `cx`.
    pub fn draw_centered(
        &self,
        img: &mut RgbaImage,
        text: &str,
        cx: i32,
        y: i32,
        px: f32,
        color: Rgba<u8>,
    ) {
        let (w, _) = self.size(text, px);
        self.draw(img, text, cx - w / 2, y, px, color);
    }

    /// Draws `text` ending at `right`, vertically centered on `cy`.
    pub fn draw_right_aligned(
        &self,
        img: &mut RgbaImage,
        text: &str,
        right: i32,
        cy: i32,
        px: f32,
        color: Rgba<u8>,
    ) {
        let (w, h) = self.size(text, px);
        self.draw(img, text, right - w, cy - h / 2, px, color);
    }

    /// Draws `text` rotated a quarter turn counter-clockwise, centered on
    /// `(cx, cy)`.
    pub fn draw_vertical(
        &self,
        img: &mut RgbaImage,
        text: &str,
        cx: i32,
        cy: i32,
        px: f32,
        color: Rgba<u8>,
    ) {
        let (w, h) = self.size(text, px);
        if w <= 0 || h <= 0 {
            return;
        }
        let mut label = RgbaImage::from_pixel(w as u32, h as u32, Rgba([0, 0, 0, 0]));
        self.draw(&mut label, text, 0, 0, px, color);
        let rotated = imageops::rotate270(&label);
        let x = i64::from(cx) - i64::from(rotated.width() / 2);
        let y = i64::from(cy) - i64::from(rotated.height() / 2);
        imageops::overlay(img, &rotated, x, y);
    }
}
