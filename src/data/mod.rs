//! Synthetic input data.

pub mod sample;

pub use sample::{SampleConfig, SampleRow, generate_rows, write_sample_csv};
