//! Integration tests: GeoTIFF series and NetCDF export.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array3;
use swbs_export::{
    ExportError, OutputNames, RasterExportRequest, export_netcdf, export_raster_series,
};
use swbs_grid::{GridSeries, ReaderConfig, TimeAxis, read_grid_series};
use swbs_summary::Recipe;
use tempfile::tempdir;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NY: usize = 4;
const NX: usize = 5;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small Albers grid centred on the projection origin.
fn summary(time: TimeAxis) -> GridSeries {
    let nt = time.len();
    let x: Vec<f64> = (0..NX).map(|i| -8000.0 + 4000.0 * i as f64).collect();
    let y: Vec<f64> = (0..NY).map(|j| 6000.0 - 4000.0 * j as f64).collect();
    let data = Array3::from_shape_fn((nt, NY, NX), |(t, _, _)| t as f64 + 1.0);
    GridSeries::new("net_infiltration", "inches", time, y, x, data)
        .unwrap()
        .with_attr("scenario_name", "historical")
}

fn request(recipe: &str, dir: &Path) -> RasterExportRequest {
    let names = OutputNames::new(
        "historical",
        "1981-1990",
        "gridMET",
        "net_infiltration",
        recipe.parse::<Recipe>().unwrap(),
    );
    RasterExportRequest::new(names, dir)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|rd| {
            rd.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// GeoTIFF series
// ---------------------------------------------------------------------------

#[test]
fn seasonal_series_writes_one_file_per_quarter() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tif");
    let s = summary(TimeAxis::Dates(vec![ymd(1980, 12, 1), ymd(1981, 3, 1)]));

    let written = export_raster_series(&s, &request("seasonal_sum", &out)).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(
        file_names(&out),
        vec![
            "historical_1981-1990_gridMET_modelVal_seasonal-DJF-1980_net_infiltration-inches.tif",
            "historical_1981-1990_gridMET_modelVal_seasonal-MAM-1981_net_infiltration-inches.tif",
        ]
    );
}

#[test]
fn geotiff_reads_back_as_wgs84() {
    let dir = tempdir().unwrap();
    let s = summary(TimeAxis::Collapsed);

    let written = export_raster_series(&s, &request("mean_annual_sum", dir.path())).unwrap();
    assert_eq!(written.len(), 1);
    assert!(
        written[0]
            .to_string_lossy()
            .ends_with("historical_1981-1990_gridMET_modelVal_yearly_net_infiltration-inches.tif")
    );

    let mut decoder = Decoder::new(File::open(&written[0]).unwrap()).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (NX as u32, NY as u32));

    let keys = decoder.get_tag_u16_vec(Tag::Unknown(34735)).unwrap();
    assert!(keys.ends_with(&[2048, 0, 1, 4326]));

    let tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(33922)).unwrap();
    // Upper-left corner lies just west of -96 and north of 23.
    assert!(tiepoint[3] < -96.0 && tiepoint[3] > -96.2, "{tiepoint:?}");
    assert!(tiepoint[4] > 23.0 && tiepoint[4] < 23.2, "{tiepoint:?}");

    match decoder.read_image().unwrap() {
        DecodingResult::F32(values) => {
            assert_eq!(values.len(), NX * NY);
            assert!(values.iter().all(|v| v.is_nan() || *v == 1.0));
            assert!(values.iter().any(|v| *v == 1.0));
        }
        _ => panic!("expected f32 data"),
    }
}

#[test]
fn same_crs_keeps_source_geometry() {
    let dir = tempdir().unwrap();
    let s = summary(TimeAxis::Collapsed);

    let req = request("mean_annual_mean", dir.path()).with_crs(5070, 5070);
    let written = export_raster_series(&s, &req).unwrap();

    let mut decoder = Decoder::new(File::open(&written[0]).unwrap()).unwrap();
    let scale = decoder.get_tag_f64_vec(Tag::Unknown(33550)).unwrap();
    assert_eq!(&scale[..2], &[4000.0, 4000.0]);
    let tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(33922)).unwrap();
    assert_eq!(&tiepoint[3..5], &[-10_000.0, 8000.0]);
    let keys = decoder.get_tag_u16_vec(Tag::Unknown(34735)).unwrap();
    assert!(keys.ends_with(&[3072, 0, 1, 5070]));
}

#[test]
fn annual_files_do_not_collide() {
    let dir = tempdir().unwrap();
    let s = summary(TimeAxis::Dates(vec![ymd(1981, 12, 31), ymd(1982, 12, 31)]));

    export_raster_series(&s, &request("annual_sum", dir.path())).unwrap();
    let names = file_names(dir.path());
    assert_eq!(names.len(), 2);
    assert!(names[0].contains("_yearly-1981_"));
    assert!(names[1].contains("_yearly-1982_"));
}

#[test]
fn mean_seasonal_uses_season_tokens() {
    let dir = tempdir().unwrap();
    let s = summary(TimeAxis::Months(vec![3, 6, 9, 12]));

    export_raster_series(&s, &request("mean_seasonal_mean", dir.path())).unwrap();
    let names = file_names(dir.path());
    for token in ["seasonal-DJF", "seasonal-MAM", "seasonal-JJA", "seasonal-SON"] {
        assert!(names.iter().any(|n| n.contains(&format!("_{token}_"))), "{token}");
    }
}

#[test]
fn monthly_family_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tif");
    let s = summary(TimeAxis::Months((1..=12).collect()));

    let err = export_raster_series(&s, &request("mean_monthly_sum", &out)).unwrap_err();
    assert!(err.is_unsupported());
    assert!(!out.exists());
}

#[test]
fn bad_season_month_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tif");
    let s = summary(TimeAxis::Months(vec![3, 6, 7]));

    let err = export_raster_series(&s, &request("mean_seasonal_sum", &out)).unwrap_err();
    assert!(matches!(err, ExportError::UnknownSeason { month: 7 }));
    assert!(file_names(&out).is_empty());
}

#[test]
fn unsupported_crs_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tif");
    let s = summary(TimeAxis::Collapsed);

    let req = request("mean_annual_sum", &out).with_crs(5070, 3857);
    let err = export_raster_series(&s, &req).unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedCrs { epsg: 3857 }));
    assert!(!out.exists());
}

// ---------------------------------------------------------------------------
// NetCDF
// ---------------------------------------------------------------------------

#[test]
fn netcdf_export_roundtrips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("annual.nc");
    let s = summary(TimeAxis::Dates(vec![ymd(1981, 12, 31), ymd(1982, 12, 31)]));

    export_netcdf(&s, &path).unwrap();

    let back = read_grid_series(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(back.data(), s.data());
    assert_eq!(back.time(), s.time());
    assert_eq!(back.units(), "inches");

    let file = netcdf::open(&path).unwrap();
    assert!(file.attribute("scenario_name").is_some());
}
