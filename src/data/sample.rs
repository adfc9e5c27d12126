//! Synthetic waste log generation.
//!
//! Produces a daily log with one row per (area, type) pair. Each row's weight
//! is a per-pair base level scaled by a slow upward drift and a weekday
//! profile, plus Gaussian noise. A configurable fraction of rows is corrupted
//! (unparseable date or weight) to exercise the validator.

use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::WasteError;
use crate::io::export::flush;
use crate::io::ingest::{COL_AREA, COL_DATE, COL_TYPE, COL_WEIGHT};

pub const AREAS: [&str; 4] = ["North", "South", "East", "West"];

/// Waste types with their base daily weight in kg.
pub const TYPES: [(&str, f64); 4] = [("Organic", 42.0), ("Plastic", 18.0), ("Paper", 14.0), ("Glass", 7.5)];

/// Relative volume per weekday, Monday first.
const WEEKDAY_PROFILE: [f64; 7] = [1.15, 1.0, 0.95, 1.0, 1.1, 0.85, 0.7];

/// Fractional growth per day.
const DAILY_DRIFT: f64 = 0.002;

/// Noise standard deviation relative to the expected weight.
const NOISE_REL: f64 = 0.15;

/// Parameters for `generate_rows`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: usize,
    pub seed: u64,
    pub invalid_fraction: f64,
}

/// One generated row, kept as text so corrupt values can be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub date: String,
    pub weight_kg: String,
    pub area: String,
    pub waste_type: String,
}

impl SampleConfig {
    fn validate(&self) -> Result<(), WasteError> {
        if self.days == 0 {
            return Err(WasteError::Config("Sample day count must be > 0.".to_string()));
        }
        if !(self.invalid_fraction.is_finite() && (0.0..1.0).contains(&self.invalid_fraction)) {
            return Err(WasteError::Config(
                "Invalid fraction must be in [0, 1).".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate the rows of a synthetic log. Deterministic for a given config.
pub fn generate_rows(config: &SampleConfig) -> Result<Vec<SampleRow>, WasteError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, NOISE_REL)
        .map_err(|e| WasteError::Config(format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(config.days * AREAS.len() * TYPES.len());
    for day in 0..config.days {
        let date = config.start + Duration::days(day as i64);
        let profile = WEEKDAY_PROFILE[date.weekday().num_days_from_monday() as usize];
        let drift = 1.0 + DAILY_DRIFT * day as f64;

        for (a, area) in AREAS.iter().enumerate() {
            // Areas differ in size: North is the largest.
            let area_scale = 1.0 - 0.12 * a as f64;
            for (waste_type, base) in TYPES {
                let expected = base * area_scale * drift * profile;
                let weight = (expected * (1.0 + noise.sample(&mut rng))).max(0.0);

                let mut row = SampleRow {
                    date: date.format("%Y-%m-%d").to_string(),
                    weight_kg: format!("{weight:.2}"),
                    area: area.to_string(),
                    waste_type: waste_type.to_string(),
                };
                if config.invalid_fraction > 0.0 && rng.r#gen::<f64>() < config.invalid_fraction {
                    corrupt(&mut row, &mut rng);
                }
                rows.push(row);
            }
        }
    }
    Ok(rows)
}

fn corrupt(row: &mut SampleRow, rng: &mut StdRng) {
    match rng.gen_range(0..3) {
        0 => row.date = "not-a-date".to_string(),
        1 => row.weight_kg = "n/a".to_string(),
        _ => row.weight_kg = "-5".to_string(),
    }
}

/// Generate a log and write it to `path` as CSV. Returns the row count.
pub fn write_sample_csv(path: &Path, config: &SampleConfig) -> Result<usize, WasteError> {
    let rows = generate_rows(config)?;

    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| WasteError::csv(format!("Failed to create '{}'", path.display()), e))?;
    writer
        .write_record([COL_DATE, COL_WEIGHT, COL_AREA, COL_TYPE])
        .map_err(|e| WasteError::csv(format!("Failed to write header to '{}'", path.display()), e))?;
    for row in &rows {
        writer
            .write_record([&row.date, &row.weight_kg, &row.area, &row.waste_type])
            .map_err(|e| WasteError::csv(format!("Failed to write row to '{}'", path.display()), e))?;
    }
    flush(writer, path)?;

    log::info!("Wrote {} synthetic rows to '{}'", rows.len(), path.display());
    Ok(rows.len())
}
