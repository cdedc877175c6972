//! End-to-end tests through GDAL
//!
//! Fixtures are ESRI ASCII grids stitched into a two-band VRT, written to a
//! temporary directory.

use bag_vis::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const UTM_18N: &str = r#"PROJCS["NAD83 / UTM zone 18N",GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101,AUTHORITY["EPSG","7019"]],AUTHORITY["EPSG","6269"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4269"]],PROJECTION["Transverse_Mercator"],PARAMETER["latitude_of_origin",0],PARAMETER["central_meridian",-75],PARAMETER["scale_factor",0.9996],PARAMETER["false_easting",500000],PARAMETER["false_northing",0],UNIT["metre",1,AUTHORITY["EPSG","9001"]],AXIS["Easting",EAST],AXIS["Northing",NORTH],AUTHORITY["EPSG","26918"]]"#;

fn write_ascii_grid(path: &Path, rows: &[&[f64]], nodata: f64) {
    let mut text = format!(
        "ncols {}\nnrows {}\nxllcorner 0\nyllcorner 0\ncellsize 1\nNODATA_value {nodata}\n",
        rows[0].len(),
        rows.len()
    );
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    fs::write(path, text).expect("Failed to write ASCII grid");
}

/// Writes a 2x2 two-band VRT and returns its path.
fn write_bag_like_vrt(dir: &TempDir, georeferenced: bool) -> PathBuf {
    write_ascii_grid(
        &dir.path().join("elevation.asc"),
        &[&[10.0, -9999.0], &[20.0, 30.0]],
        -9999.0,
    );
    write_ascii_grid(
        &dir.path().join("uncertainty.asc"),
        &[&[0.5, 0.6], &[0.7, 0.8]],
        -9999.0,
    );

    let georef = if georeferenced {
        format!(
            "  <SRS>{UTM_18N}</SRS>\n  <GeoTransform>500000.0, 3.0, 0.0, 4000000.0, 0.0, -3.0</GeoTransform>\n"
        )
    } else {
        String::new()
    };

    let vrt = format!(
        r#"<VRTDataset rasterXSize="2" rasterYSize="2">
{georef}  <VRTRasterBand dataType="Float32" band="1">
    <NoDataValue>-9999</NoDataValue>
    <Metadata>
      <MDI key="STATISTICS_MINIMUM">10</MDI>
      <MDI key="STATISTICS_MAXIMUM">30</MDI>
    </Metadata>
    <SimpleSource>
      <SourceFilename relativeToVRT="1">elevation.asc</SourceFilename>
      <SourceBand>1</SourceBand>
    </SimpleSource>
  </VRTRasterBand>
  <VRTRasterBand dataType="Float32" band="2">
    <SimpleSource>
      <SourceFilename relativeToVRT="1">uncertainty.asc</SourceFilename>
      <SourceBand>1</SourceBand>
    </SimpleSource>
  </VRTRasterBand>
</VRTDataset>
"#
    );

    let path = dir.path().join("survey.vrt");
    fs::write(&path, vrt).expect("Failed to write VRT");
    path
}

#[test]
fn test_open_nonexistent_file_is_open_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("does_not_exist.bag");

    match GdalRaster::open(&missing) {
        Err(BagVisError::OpenError { path, .. }) => assert_eq!(path, missing),
        Err(other) => panic!("Expected OpenError, got {other}"),
        Ok(_) => panic!("Expected OpenError for {}", missing.display()),
    }
}

#[test]
fn test_file_without_geotransform_is_georeference_error() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_bag_like_vrt(&dir, false);

    let raster = GdalRaster::open(&path)?;
    assert!(raster.geo_transform().is_none());
    assert!(matches!(
        summarize(&raster, &SummaryConfig::default()),
        Err(BagVisError::GeoreferenceError { .. })
    ));
    Ok(())
}

#[test]
fn test_summarize_vrt_end_to_end() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_bag_like_vrt(&dir, true);

    let raster = GdalRaster::open(&path)?;
    assert_eq!(raster.band_count(), 2);
    assert_eq!(raster.raster_size(), (2, 2));

    let summary = summarize(&raster, &SummaryConfig::default())?;

    assert_eq!(
        summary.geotransform.to_array(),
        [500_000.0, 3.0, 0.0, 4_000_000.0, 0.0, -3.0]
    );
    assert_eq!(
        summary.bbox.as_extent(),
        [500_000.0, 500_006.0, 3_999_994.0, 4_000_000.0]
    );

    let elevation = summary.elevation();
    assert_eq!(elevation.metadata.data_type, "Float32");
    assert_eq!(elevation.metadata.nodata, Some(-9999.0));
    assert_eq!(elevation.metadata.minimum, Some(10.0));
    assert_eq!(elevation.metadata.maximum, Some(30.0));
    assert_eq!(elevation.statistics, StatisticsOrigin::Declared);

    let uncertainty = summary.uncertainty();
    assert_eq!(uncertainty.metadata.nodata, None);
    assert_eq!(uncertainty.statistics, StatisticsOrigin::Unavailable);

    assert!(summary.depth.get(0, 1).is_some_and(f64::is_nan));
    assert_eq!(summary.depth.get(1, 1), Some(-30.0));
    assert_eq!(summary.depth_range.min, -30.0);
    assert_eq!(summary.depth_range.max, -10.0);

    assert!(summary.projection.wkt.contains("UTM zone 18N"));
    assert_eq!(summary.projection.name, "NAD83 / UTM zone 18N");

    let text = Report::new(&summary).to_string();
    assert!(text.contains("minimum depth: -30.000"));
    assert!(text.contains("Uncertainty band -> min/max values in meters: unavailable"));
    Ok(())
}

#[test]
fn test_compute_missing_stats_through_gdal() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_bag_like_vrt(&dir, true);

    let raster = GdalRaster::open(&path)?;
    let config = SummaryConfig {
        compute_missing_statistics: true,
        ..SummaryConfig::default()
    };
    let summary = summarize(&raster, &config)?;

    let uncertainty = summary.uncertainty();
    assert_eq!(uncertainty.statistics, StatisticsOrigin::Computed);
    let min = uncertainty.metadata.minimum.unwrap_or(f64::NAN);
    let max = uncertainty.metadata.maximum.unwrap_or(f64::NAN);
    assert!((min - 0.5).abs() < 1e-6, "min = {min}");
    assert!((max - 0.8).abs() < 1e-6, "max = {max}");
    Ok(())
}

#[test]
fn test_render_outputs_from_vrt() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_bag_like_vrt(&dir, true);

    let raster = GdalRaster::open(&path)?;
    let summary = summarize(&raster, &SummaryConfig::default())?;

    let raw_path = dir.path().join("raw.png");
    save_png(&render_raw(&summary.depth, &summary.depth_range)?, &raw_path)?;
    let raw = image::open(&raw_path)?;
    assert_eq!((raw.width(), raw.height()), (2, 2));

    let figure_path = dir.path().join("figure.png");
    let config = FigureConfig {
        width: 800,
        height: 600,
        grid_spacing: 2.0,
        ..FigureConfig::default()
    };
    save_png(&render_figure(&summary, &config)?, &figure_path)?;
    let figure = image::open(&figure_path)?;
    assert_eq!((figure.width(), figure.height()), (800, 600));
    Ok(())
}

#[test]
fn test_projection_name_from_projected_wkt() {
    let info = ProjectionInfo::from_wkt(UTM_18N);
    assert_eq!(info.name, "NAD83 / UTM zone 18N");
    assert!(!info.is_empty());
}

#[test]
fn test_geographic_crs_has_no_projection_name() {
    let wkt = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4326"]]"#;
    let info = ProjectionInfo::from_wkt(wkt);
    assert_eq!(info.name, "");
    assert!(!info.is_empty());
}

#[test]
fn test_compound_crs_names_its_horizontal_projection() {
    let wkt = format!(
        r#"COMPD_CS["NAD83 / UTM zone 18N + MLLW depth",{UTM_18N},VERT_CS["MLLW depth",VERT_DATUM["Mean Lower Low Water",2005],UNIT["metre",1,AUTHORITY["EPSG","9001"]],AXIS["Depth",DOWN]]]"#
    );
    assert_eq!(ProjectionInfo::from_wkt(wkt).name, "NAD83 / UTM zone 18N");
}

#[test]
fn test_malformed_wkt_gives_empty_name() {
    assert_eq!(ProjectionInfo::from_wkt("not wkt at all").name, "");
    assert_eq!(ProjectionInfo::from_wkt(r#"PROJCS["unterminated"#).name, "");
}

#[test]
fn test_figure_with_tiny_grid_spacing_renders_without_gridlines() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_bag_like_vrt(&dir, true);

    let raster = GdalRaster::open(&path)?;
    let summary = summarize(&raster, &SummaryConfig::default())?;
    let config = FigureConfig {
        width: 800,
        height: 600,
        grid_spacing: 1e-17,
        ..FigureConfig::default()
    };
    let figure = render_figure(&summary, &config)?;
    assert_eq!(figure.dimensions(), (800, 600));
    Ok(())
}
