//! # Analysis Crate
//!
//! Load and diversity analytics over a running purgesim simulation, and the
//! [`Reporter`](reporter::Reporter) that writes them to TSV on the recording
//! duty cycle.

pub mod analysis;
pub mod reporter;

pub use reporter::Reporter;
