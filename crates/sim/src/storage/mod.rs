//! Storage module for the report artifacts.
//!
//! Reports are plain TSV files with one header line and one row per recorded
//! generation. The recording duty cycle lives here as well.

mod recorder;
pub mod types;

pub use recorder::{join_values, ReportWriter, TsvRecord};
pub use types::RecordingStrategy;
