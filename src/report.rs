//! Console and JSON views of a [`Summary`]
//!
//! All number formatting happens here: geotransform coefficients with two
//! decimals, corner coordinates with three, band and depth values with three.

use crate::errors::Result;
use crate::metadata::{BandInfo, StatisticsOrigin};
use crate::summary::Summary;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Human-readable report of a summary.
pub struct Report<'a> {
    summary: &'a Summary,
    generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    pub fn new(summary: &'a Summary) -> Self {
        Self::at(summary, Utc::now())
    }

    /// Report with a fixed generation time.
    pub fn at(summary: &'a Summary, generated_at: DateTime<Utc>) -> Self {
        Self {
            summary,
            generated_at,
        }
    }

    /// The summary as pretty-printed JSON. The depth grid itself is omitted.
    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'s> {
            generated_at: String,
            #[serde(flatten)]
            summary: &'s Summary,
        }

        Ok(serde_json::to_string_pretty(&JsonReport {
            generated_at: self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary: self.summary,
        })?)
    }
}

/// Fixed-point value, `nan` for undefined values.
fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

fn write_band(f: &mut fmt::Formatter<'_>, band: &BandInfo) -> fmt::Result {
    let label = band.role.label();
    let meta = &band.metadata;
    writeln!(f, "{label} band -> data type: {}", meta.data_type)?;

    match (meta.minimum, meta.maximum) {
        (Some(min), Some(max)) => {
            let note = match band.statistics {
                StatisticsOrigin::Computed => " (computed)",
                _ => "",
            };
            writeln!(
                f,
                "{label} band -> min/max values in meters: {}/{}{note}",
                fixed(min, 3),
                fixed(max, 3)
            )?;
        }
        _ => writeln!(f, "{label} band -> min/max values in meters: unavailable")?,
    }

    match meta.nodata {
        Some(nodata) => writeln!(f, "{label} band -> nodata value: {nodata:?}"),
        None => writeln!(f, "{label} band -> nodata value: None"),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let gt = &s.geotransform;

        writeln!(f, "Raster file: {}", s.source)?;
        writeln!(f)?;

        let coeffs: Vec<String> = gt.to_array().iter().map(|c| fixed(*c, 2)).collect();
        writeln!(f, "Geo-Transform: [{}]", coeffs.join(", "))?;
        let (x, y) = gt.top_left();
        writeln!(f, "x coordinate of the top-left corner : {}", fixed(x, 3))?;
        writeln!(f, "y coordinate of the top-left corner : {}", fixed(y, 3))?;
        writeln!(f, "Top-left Corner = ({}, {})", fixed(x, 2), fixed(y, 2))?;
        let (res_x, res_y) = gt.resolution();
        writeln!(f, "Grid Resolution = ({}, {})", fixed(res_x, 2), fixed(res_y, 2))?;
        writeln!(f)?;

        write_band(f, s.elevation())?;
        write_band(f, s.uncertainty())?;
        writeln!(f)?;

        writeln!(f, "Projection:")?;
        writeln!(f, "- WKT:")?;
        writeln!(f, "{}", s.projection.wkt)?;
        writeln!(f, "- name: {}", s.projection.name)?;
        writeln!(f)?;

        let (rows, cols) = s.shape;
        writeln!(
            f,
            "Depth grid: {rows} x {cols} cells, {} with values",
            s.valid_cells
        )?;
        writeln!(f, "minimum depth: {}", fixed(s.depth_range.min, 3))?;
        writeln!(f, "maximum depth: {}", fixed(s.depth_range.max, 3))?;

        let extent: Vec<String> = s.bbox.as_extent().iter().map(|c| fixed(*c, 3)).collect();
        writeln!(f, "Raster extent: [{}]", extent.join(", "))?;
        writeln!(f)?;
        write!(
            f,
            "Generated by BagVis on {}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
