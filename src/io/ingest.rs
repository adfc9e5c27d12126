//! CSV ingest and cleaning.
//!
//! This module is responsible for turning a raw waste-collection log into a
//! clean set of `Observation`s that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required fields (every missing column reported, exit code 2)
//! - **Lenient rows**: rows with a missing/invalid date or weight are dropped silently
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::Observation;
use crate::error::WasteError;

pub const COL_DATE: &str = "Date";
pub const COL_WEIGHT: &str = "Weight_kg";
pub const COL_AREA: &str = "Area";
pub const COL_TYPE: &str = "Type";

/// Required input columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_WEIGHT, COL_AREA, COL_TYPE];

/// Label used when an `Area` or `Type` cell is blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Row counts gathered while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_used: usize,
    /// Rows dropped because the date was missing or unparseable.
    pub dropped_date: usize,
    /// Rows dropped because the weight was missing, non-numeric, non-finite or negative.
    pub dropped_weight: usize,
}

impl IngestStats {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_used
    }
}

/// Ingest output: validated observations + counts.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub observations: Vec<Observation>,
    pub stats: IngestStats,
}

/// Open and clean the CSV at `path`.
pub fn load_observations(path: &Path) -> Result<IngestedData, WasteError> {
    let file = File::open(path)
        .map_err(|e| WasteError::io(format!("Failed to open CSV '{}'", path.display()), e))?;
    let data = read_observations(file)?;

    log::info!(
        "Loaded '{}': {} rows read, {} used, {} dropped (date: {}, weight: {})",
        path.display(),
        data.stats.rows_read,
        data.stats.rows_used,
        data.stats.rows_dropped(),
        data.stats.dropped_date,
        data.stats.dropped_weight,
    );
    if data.stats.rows_read > 0 && data.stats.dropped_date == data.stats.rows_read {
        log::warn!(
            "No date in '{}' could be parsed; expected YYYY-MM-DD, DD/MM/YYYY or MM/DD/YYYY",
            path.display()
        );
    }
    Ok(data)
}

/// Clean observations from any CSV source.
///
/// Fails with `WasteError::Schema` before reading a single row if any of the
/// required columns is absent.
pub fn read_observations<R: Read>(source: R) -> Result<IngestedData, WasteError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| WasteError::csv("Failed to read CSV headers", e))?
        .clone();

    let columns = resolve_columns(&headers)?;

    let mut observations = Vec::new();
    let mut stats = IngestStats::default();

    for result in reader.records() {
        stats.rows_read += 1;

        // A record the CSV reader cannot decode has no usable date either.
        let Ok(record) = result else {
            stats.dropped_date += 1;
            continue;
        };

        match parse_row(&record, &columns) {
            Ok(obs) => observations.push(obs),
            Err(RowProblem::Date) => stats.dropped_date += 1,
            Err(RowProblem::Weight) => stats.dropped_weight += 1,
        }
    }

    stats.rows_used = observations.len();
    Ok(IngestedData {
        observations,
        stats,
    })
}

/// Column positions of the required fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    weight: usize,
    area: usize,
    waste_type: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowProblem {
    Date,
    Weight,
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, WasteError> {
    let header_map = build_header_map(headers);
    let lookup = |name: &str| header_map.get(&normalize_header_name(name)).copied();

    let found = REQUIRED_COLUMNS.map(lookup);
    match found {
        [Some(date), Some(weight), Some(area), Some(waste_type)] => Ok(Columns {
            date,
            weight,
            area,
            waste_type,
        }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            Err(WasteError::Schema { missing })
        }
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins when a header is duplicated.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "\u{feff}Date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<Observation, RowProblem> {
    let date = get_value(record, columns.date)
        .and_then(parse_date)
        .ok_or(RowProblem::Date)?;
    let weight_kg = get_value(record, columns.weight)
        .and_then(parse_weight)
        .ok_or(RowProblem::Weight)?;

    Ok(Observation {
        date,
        weight_kg,
        area: label_or_unknown(get_value(record, columns.area)),
        waste_type: label_or_unknown(get_value(record, columns.waste_type)),
    })
}

fn get_value(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn label_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN_LABEL).to_string()
}

/// Parse a calendar date, discarding any time-of-day component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    // ISO first. Slash/dash dates are read day-first; month-first is only
    // tried when the day-first reading is not a valid date (`03/15/2024`).
    const DATE_FMTS: [&str; 6] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Coerce a weight cell to kilograms. Non-numeric, non-finite and negative
/// values are treated as missing.
pub fn parse_weight(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 { Some(v) } else { None }
}
