//! End-to-end pipeline runs against temporary directories.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use waste_trends::app::pipeline::run_pipeline;
use waste_trends::data::{SampleConfig, write_sample_csv};
use waste_trends::domain::PipelineConfig;
use waste_trends::error::WasteError;
use waste_trends::io::export::{
    AREA_TABLE, DAILY_TABLE, FORECAST_SUMMARY, FORECAST_TABLE, TYPE_TABLE, WEEKLY_TABLE, read_category_totals,
};
use waste_trends::report::{AREA_CHART, DAILY_CHART, FORECAST_CHART, TYPE_CHART, WEEKLY_CHART};

fn config_in(dir: &Path, input: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: input.to_path_buf(),
        charts_dir: dir.join("plots"),
        tables_dir: dir.join("tables"),
        ..PipelineConfig::default()
    }
}

#[test]
fn full_run_writes_every_table_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waste_data.csv");
    write_sample_csv(
        &input,
        &SampleConfig {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days: 70,
            seed: 42,
            invalid_fraction: 0.05,
        },
    )
    .unwrap();

    let config = config_in(dir.path(), &input);
    let run = run_pipeline(&config).unwrap();

    for name in [DAILY_TABLE, WEEKLY_TABLE, AREA_TABLE, TYPE_TABLE, FORECAST_TABLE, FORECAST_SUMMARY] {
        assert!(config.tables_dir.join(name).exists(), "missing {name}");
    }
    for name in [DAILY_CHART, WEEKLY_CHART, AREA_CHART, TYPE_CHART, FORECAST_CHART] {
        assert!(config.charts_dir.join(name).exists(), "missing {name}");
    }
    assert_eq!(run.artifacts.charts.len(), 5);
    assert_eq!(run.artifacts.tables.len(), 6);

    // 70 days from a Monday cover exactly 10 weeks.
    assert_eq!(run.aggregates.weekly.len(), 10);
    assert_eq!(run.forecast.points.len(), 4);
    assert_eq!(
        run.forecast.points[0].week_start,
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    );

    let areas = read_category_totals(&config.tables_dir.join(AREA_TABLE)).unwrap();
    let area_sum: f64 = areas.iter().map(|c| c.weight_kg).sum();
    assert!((area_sum - run.aggregates.grand_total).abs() < 1e-6 * run.aggregates.grand_total.max(1.0));

    let forecast_csv = fs::read_to_string(config.tables_dir.join(FORECAST_TABLE)).unwrap();
    assert_eq!(forecast_csv.lines().count(), 5);
    assert!(forecast_csv.starts_with("week,predicted_weight_kg"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.tables_dir.join(FORECAST_SUMMARY)).unwrap()).unwrap();
    assert_eq!(summary["points"].as_array().map(Vec::len), Some(4));
}

#[test]
fn missing_type_column_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waste_data.csv");
    fs::write(&input, "Date,Weight_kg,Area\n2024-01-01,10,North\n").unwrap();

    let config = config_in(dir.path(), &input);
    match run_pipeline(&config) {
        Err(WasteError::Schema { missing }) => assert_eq!(missing, vec!["Type".to_string()]),
        other => panic!("expected Schema error, got {other:?}"),
    }
    assert!(!config.charts_dir.exists());
    assert!(!config.tables_dir.exists());
}

#[test]
fn too_little_history_keeps_descriptive_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waste_data.csv");
    fs::write(
        &input,
        "Date,Weight_kg,Area,Type\n\
         2024-01-01,10,North,Organic\n\
         2024-01-03,5,South,Plastic\n\
         2024-01-09,7,North,Glass\n",
    )
    .unwrap();

    let config = config_in(dir.path(), &input);
    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, WasteError::InsufficientData { needed: 3, got: 2 }));
    assert_eq!(err.exit_code(), 3);

    for name in [DAILY_TABLE, WEEKLY_TABLE, AREA_TABLE, TYPE_TABLE] {
        assert!(config.tables_dir.join(name).exists(), "missing {name}");
    }
    assert!(config.charts_dir.join(WEEKLY_CHART).exists());
    assert!(!config.tables_dir.join(FORECAST_TABLE).exists());
    assert!(!config.charts_dir.join(FORECAST_CHART).exists());

    let weekly = fs::read_to_string(config.tables_dir.join(WEEKLY_TABLE)).unwrap();
    let lines: Vec<&str> = weekly.lines().collect();
    assert_eq!(lines, vec!["week,Weight_kg", "2024-01-01,15.0", "2024-01-08,7.0"]);
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), &dir.path().join("nope.csv"));
    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, WasteError::Io { .. }));
    assert_eq!(err.exit_code(), 2);
}
