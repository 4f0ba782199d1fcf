//! Simulation engine, population management and the demographic machinery.
//!
//! - `Simulation`: the engine that processes one generation per `step`.
//! - `Population`: living individuals with their target Ne and soft capacity.
//! - `DemographicSchedule`: the target Ne trajectory of a run.
//! - `CapacityRegulator`: feedback that keeps the realized size on target.
//! - `SimulationBuilder`: fluent construction with documented defaults.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod population;
pub mod regulator;
pub mod reproduction;
pub mod schedule;

pub use builder::SimulationBuilder;
pub use configs::{
    ArchitectureConfig, Configuration, DemographyConfig, ExecutionConfig, ReportingConfig,
};
pub use engine::{GenerationSummary, Simulation};
pub use population::{MutationCount, Population};
pub use regulator::{Adjustment, CapacityRegulator};
pub use reproduction::{apply_soft_selection, enforce_survival, Reproduction};
pub use schedule::DemographicSchedule;
