//! Base types shared by the engine and the analytics.
//!
//! This module provides fitness values and the seeded random sources used
//! across the purgesim workspace.

pub mod fitness;
pub mod random;

pub use fitness::{FitnessValue, LogFitnessValue};
pub use random::{child_seeds, rng_from_seed, sample_indices, SimRng};
