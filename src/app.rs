//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline and prints its results
//! - generates synthetic logs

use clap::Parser;

use crate::cli::{Command, RunArgs, SampleArgs};
use crate::data::{SampleConfig, write_sample_csv};
use crate::error::WasteError;
use crate::report::{format_peak, format_run_summary, format_saved};

pub mod pipeline;

/// Entry point for the `waste` binary.
pub fn run() -> Result<(), WasteError> {
    // `waste` and `waste data.csv` behave like `waste run ...`; clap needs
    // an explicit subcommand, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(&args),
        Command::Sample(args) => handle_sample(&args),
    }
}

fn handle_run(args: &RunArgs) -> Result<(), WasteError> {
    let config = args.to_config();
    let run = pipeline::run_pipeline(&config)?;

    print!(
        "{}",
        format_run_summary(&run.ingest.stats, &run.aggregates, Some(&run.forecast))
    );
    println!("{}", format_peak(&run.forecast.peak));
    for path in &run.artifacts.tables {
        println!("{}", format_saved(path));
    }
    Ok(())
}

fn handle_sample(args: &SampleArgs) -> Result<(), WasteError> {
    let config = SampleConfig {
        start: args.start,
        days: args.days,
        seed: args.seed,
        invalid_fraction: args.invalid_fraction,
    };
    write_sample_csv(&args.output, &config)?;
    println!("{}", format_saved(&args.output));
    Ok(())
}

/// Rewrite argv so `waste` defaults to `waste run`.
///
/// Rules:
/// - `waste`                      -> `waste run`
/// - `waste data.csv ...`         -> `waste run data.csv ...`
/// - `waste --horizon 6 ...`      -> `waste run --horizon 6 ...`
/// - `waste --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "sample");
    if is_subcommand {
        return argv;
    }

    // Anything else (flags or an input path) belongs to `run`.
    argv.insert(1, "run".to_string());
    argv
}
