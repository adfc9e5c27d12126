//! Command-line parsing for the waste trend analyzer.
//!
//! Argument parsing and command dispatch stay separate from the aggregation
//! and forecasting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{GapPolicy, PipelineConfig, WeekAnchor};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "waste", version, about = "Waste generation trends and weekly peak forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a waste log, write trend charts/tables and forecast the next weeks.
    Run(RunArgs),
    /// Write a synthetic waste log for demos and smoke tests.
    Sample(SampleArgs),
}

/// Options for `waste run`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Input CSV with Date, Weight_kg, Area and Type columns.
    #[arg(value_name = "INPUT", default_value = "waste_data.csv")]
    pub input: PathBuf,

    /// Directory for the SVG charts (created if missing).
    #[arg(long, default_value = "plots")]
    pub charts_dir: PathBuf,

    /// Directory for the summary tables.
    #[arg(long, default_value = ".")]
    pub tables_dir: PathBuf,

    /// Number of weeks to forecast.
    #[arg(long, default_value_t = 4)]
    pub horizon: usize,

    /// Minimum number of weekly points required to forecast.
    #[arg(long, default_value_t = 3)]
    pub min_points: usize,

    /// Weekday that starts each week.
    #[arg(long, value_enum, default_value_t = WeekAnchor::Monday)]
    pub week_start: WeekAnchor,

    /// How to treat weeks with no observations.
    #[arg(long, value_enum, default_value_t = GapPolicy::Zero)]
    pub gap_policy: GapPolicy,
}

impl RunArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            input_path: self.input.clone(),
            charts_dir: self.charts_dir.clone(),
            tables_dir: self.tables_dir.clone(),
            horizon: self.horizon,
            min_points: self.min_points,
            week_anchor: self.week_start,
            gap_policy: self.gap_policy,
        }
    }
}

/// Options for `waste sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short, long, default_value = "waste_data.csv")]
    pub output: PathBuf,

    /// Number of consecutive days to generate.
    #[arg(long, default_value_t = 120)]
    pub days: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First day of the log (YYYY-MM-DD).
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,

    /// Fraction of rows written with an unparseable date or weight.
    #[arg(long, default_value_t = 0.0)]
    pub invalid_fraction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_pipeline_defaults() {
        let cli = Cli::parse_from(["waste", "run"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = args.to_config();
        let default = PipelineConfig::default();
        assert_eq!(config.input_path, default.input_path);
        assert_eq!(config.charts_dir, default.charts_dir);
        assert_eq!(config.tables_dir, default.tables_dir);
        assert_eq!(config.horizon, default.horizon);
        assert_eq!(config.min_points, default.min_points);
        assert_eq!(config.week_anchor, default.week_anchor);
        assert_eq!(config.gap_policy, default.gap_policy);
    }

    #[test]
    fn run_flags_are_mapped() {
        let cli = Cli::parse_from([
            "waste",
            "run",
            "log.csv",
            "--horizon",
            "6",
            "--week-start",
            "sunday",
            "--gap-policy",
            "interpolate",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = args.to_config();
        assert_eq!(config.input_path, PathBuf::from("log.csv"));
        assert_eq!(config.horizon, 6);
        assert_eq!(config.week_anchor, WeekAnchor::Sunday);
        assert_eq!(config.gap_policy, GapPolicy::Interpolate);
    }

    #[test]
    fn sample_parses_start_date() {
        let cli = Cli::parse_from(["waste", "sample", "--start", "2023-06-01", "--days", "10"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(args.days, 10);
    }
}
