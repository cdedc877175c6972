//! Spatial reference description
//!
//! The projection name is the first value of the `PROJCS` node of the
//! dataset's spatial reference, looked up through OGR. The lookup is optional
//! by nature; a dataset without projection, or a geographic one, simply has
//! no name.

use gdal::spatial_ref::SpatialRef;
use serde::Serialize;
use tracing::debug;

/// Projection of a dataset: the raw WKT and the derived name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionInfo {
    pub wkt: String,
    /// Empty when the WKT is empty or names no projected CRS.
    pub name: String,
}

impl ProjectionInfo {
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        let wkt = wkt.into();
        let name = projection_name(&wkt).unwrap_or_default();
        Self { wkt, name }
    }

    pub fn is_empty(&self) -> bool {
        self.wkt.trim().is_empty()
    }
}

/// Name of the projected CRS described by `wkt`, if any.
pub fn projection_name(wkt: &str) -> Option<String> {
    if wkt.trim().is_empty() {
        return None;
    }
    let lookup = SpatialRef::from_wkt(wkt).and_then(|srs| srs.get_attr_value("PROJCS", 0));
    match lookup {
        Ok(Some(name)) => Some(name),
        Ok(None) => {
            debug!("Spatial reference has no PROJCS node");
            None
        }
        Err(e) => {
            debug!("Unusable projection WKT: {e}");
            None
        }
    }
}
