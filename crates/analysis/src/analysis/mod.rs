//! Genetic load and diversity analytics for purgesim
//!
//! This module provides the read-only computations behind the reports:
//! - Population-level load decomposition (total / realized / masked)
//! - Individual-level load decomposition
//! - Mutation catalogs with optional genotype proportions
//! - Windowed heterozygosity (π) from neutral mutations

pub mod catalog;
pub mod diversity;
pub mod individual;
pub mod load;
pub mod utils;

// Re-export commonly used functions
pub use catalog::{population_catalog, sample_catalog, MutationCatalogRow, MutationRecord};
pub use diversity::{windowed_pi, PiRow};
pub use individual::{individual_load_f2, IndividualLoad, IndividualLoadRow};
pub use load::{population_load, population_summary, LoadComponents, PopulationLoadRow};
