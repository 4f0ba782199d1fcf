//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use purgesim_sim::prelude::*;
//!
//! let pop = Population::ancestral(4);
//! assert_eq!(pop.size(), 4);
//! ```

pub use crate::base::{rng_from_seed, FitnessValue, LogFitnessValue, SimRng};
pub use crate::errors::{self, SimulationError};
pub use crate::evolution::{GeneticArchitecture, MutationCatalog};
pub use crate::genome::{Haplotype, Individual, Mutation, MutationRef, MutationType, Zygosity};
pub use crate::simulation::{
    Configuration, DemographicSchedule, Population, Simulation, SimulationBuilder,
};
pub use crate::storage::{RecordingStrategy, ReportWriter, TsvRecord};
