//! Export summary tables to CSV (and the forecast to JSON).
//!
//! The exports are meant to be easy to consume in spreadsheets or dashboards.
//! Every table gets a header row, even when it has no data rows.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{CategoryTotal, DailyTotal, ForecastPoint, ForecastResult, WeeklyTotal};
use crate::error::WasteError;

pub const DAILY_TABLE: &str = "daily_trend.csv";
pub const WEEKLY_TABLE: &str = "weekly_trend.csv";
pub const AREA_TABLE: &str = "area_total.csv";
pub const TYPE_TABLE: &str = "type_total.csv";
pub const FORECAST_TABLE: &str = "forecast_weeks.csv";
pub const FORECAST_SUMMARY: &str = "forecast_summary.json";

/// Write daily totals (`Date,Weight_kg`).
pub fn write_daily_csv(path: &Path, rows: &[DailyTotal]) -> Result<(), WasteError> {
    write_rows(path, &["Date", "Weight_kg"], rows)
}

/// Write weekly totals (`week,Weight_kg`).
pub fn write_weekly_csv(path: &Path, rows: &[WeeklyTotal]) -> Result<(), WasteError> {
    write_rows(path, &["week", "Weight_kg"], rows)
}

/// Write projected weeks (`week,predicted_weight_kg`).
pub fn write_forecast_csv(path: &Path, rows: &[ForecastPoint]) -> Result<(), WasteError> {
    write_rows(path, &["week", "predicted_weight_kg"], rows)
}

/// Write category totals as `<label_header>,Weight_kg`, in the given order.
pub fn write_category_csv(path: &Path, label_header: &str, rows: &[CategoryTotal]) -> Result<(), WasteError> {
    write_rows(path, &[label_header, "Weight_kg"], rows)
}

/// Read a category table written by `write_category_csv`.
///
/// Columns are matched by position (label, then total); header names are not
/// checked.
pub fn read_category_totals(path: &Path) -> Result<Vec<CategoryTotal>, WasteError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| WasteError::csv(format!("Failed to open '{}'", path.display()), e))?;

    let mut out = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 2;
        let row: CategoryTotal = record
            .and_then(|r| r.deserialize(None))
            .map_err(|e| WasteError::csv(format!("Invalid row in '{}' line {line}", path.display()), e))?;
        out.push(row);
    }
    Ok(out)
}

/// Write the full forecast (points, peak, model, history) as pretty JSON.
pub fn write_forecast_json(path: &Path, forecast: &ForecastResult) -> Result<(), WasteError> {
    let file = File::create(path)
        .map_err(|e| WasteError::io(format!("Failed to create '{}'", path.display()), e))?;
    serde_json::to_writer_pretty(file, forecast).map_err(|source| WasteError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<(), WasteError> {
    let mut writer = open_writer(path)?;
    writer
        .write_record(header)
        .map_err(|e| WasteError::csv(format!("Failed to write header to '{}'", path.display()), e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| WasteError::csv(format!("Failed to write row to '{}'", path.display()), e))?;
    }
    flush(writer, path)
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>, WasteError> {
    // Headers are written explicitly so empty tables still carry one.
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| WasteError::csv(format!("Failed to create '{}'", path.display()), e))
}

pub(crate) fn flush(mut writer: csv::Writer<File>, path: &Path) -> Result<(), WasteError> {
    writer
        .flush()
        .map_err(|e| WasteError::io(format!("Failed to flush '{}'", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn category_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AREA_TABLE);
        let totals = vec![
            CategoryTotal { label: "North".to_string(), weight_kg: 1234.5678 },
            CategoryTotal { label: "South, East".to_string(), weight_kg: 0.1 + 0.2 },
            CategoryTotal { label: "West".to_string(), weight_kg: 0.0 },
        ];

        write_category_csv(&path, "Area", &totals).unwrap();
        let back = read_category_totals(&path).unwrap();

        let expected: HashMap<&str, f64> = totals.iter().map(|c| (c.label.as_str(), c.weight_kg)).collect();
        assert_eq!(back.len(), expected.len());
        for c in &back {
            let want = expected[c.label.as_str()];
            assert!((c.weight_kg - want).abs() < 1e-9, "{}: {} vs {want}", c.label, c.weight_kg);
        }
    }

    #[test]
    fn category_totals_use_the_same_number_format_as_other_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TYPE_TABLE);
        let totals = vec![CategoryTotal { label: "Organic".to_string(), weight_kg: 15.0 }];
        write_category_csv(&path, "Type", &totals).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Type,Weight_kg", "Organic,15.0"]);
    }

    #[test]
    fn unparseable_category_total_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AREA_TABLE);
        std::fs::write(&path, "Area,Weight_kg\nNorth,12.5\nSouth,lots\n").unwrap();
        let err = read_category_totals(&path).unwrap_err();
        assert!(matches!(err, WasteError::Csv { .. }), "got {err:?}");
        assert!(err.to_string().contains("line 3"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_tables_still_have_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DAILY_TABLE);
        write_daily_csv(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim(), "Date,Weight_kg");
    }

    #[test]
    fn weekly_table_uses_iso_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(WEEKLY_TABLE);
        let rows = vec![WeeklyTotal {
            week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weight_kg: 12.5,
        }];
        write_weekly_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["week,Weight_kg", "2024-01-01,12.5"]);
    }

    #[test]
    fn forecast_table_has_expected_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FORECAST_TABLE);
        let rows = vec![ForecastPoint {
            week_start: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            predicted_weight_kg: 160.0,
        }];
        write_forecast_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("week,predicted_weight_kg\n2024-02-05,160"));
    }
}
