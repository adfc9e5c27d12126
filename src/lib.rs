//! `waste-trends` library crate.
//!
//! The binary (`waste`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - each stage (ingest, aggregate, forecast, report) has typed inputs/outputs

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod report;
