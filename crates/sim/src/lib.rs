//! # Simulation Crate
//!
//! The `sim` crate provides the forward-time engine of purgesim: the genetic
//! architecture, haplotypes and individuals, the mutation, recombination and
//! selection operators, the demographic schedule with its capacity
//! regulator, and the TSV report writers.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod simulation;
pub mod storage;

pub use base::{FitnessValue, LogFitnessValue, SimRng};
