//! Builder pattern for creating simulations.
//!
//! Provides a fluent API over [`Configuration`] with the documented defaults
//! for every parameter that is not set.

use crate::errors::SimulationError;
use crate::simulation::{Configuration, Simulation};
use std::path::PathBuf;

/// Builder for constructing Simulation instances with a fluent API.
///
/// # Examples
///
/// ```
/// use purgesim_sim::simulation::SimulationBuilder;
///
/// let mut sim = SimulationBuilder::new()
///     .capacity(20)
///     .genome(20, 4, 2)
///     .deleterious_types(10)
///     .burn_in(0.5)
///     .bottleneck(10, 1, 1)
///     .recovery(1.0, 1)
///     .tail(1)
///     .seed(7)
///     .build()
///     .unwrap();
/// sim.run().unwrap();
/// assert_eq!(sim.generation(), sim.schedule().end());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: Configuration,
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self { config }
    }

    /// The configuration built so far.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Set the carrying capacity K.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.execution.capacity = capacity;
        self
    }

    /// Set random seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.execution.seed = Some(seed);
        self
    }

    pub fn regulator_tolerance(mut self, tolerance: f64) -> Self {
        self.config.execution.regulator_tolerance = tolerance;
        self
    }

    pub fn deleterious_types(mut self, count: usize) -> Self {
        self.config.architecture.deleterious_types = count;
        self
    }

    pub fn lethal_fraction(mut self, fraction: f64) -> Self {
        self.config.architecture.lethal_fraction = fraction;
        self
    }

    /// Set gene length, gene count and number of chromosome groups.
    pub fn genome(mut self, gene_length: usize, gene_count: usize, chromosome_count: usize) -> Self {
        self.config.architecture.gene_length = gene_length;
        self.config.architecture.gene_count = gene_count;
        self.config.architecture.chromosome_count = chromosome_count;
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.architecture.mutation_rate = rate;
        self
    }

    pub fn recombination_rate(mut self, rate: f64) -> Self {
        self.config.architecture.recombination_rate = rate;
        self
    }

    /// Burn-in length as a multiple of K.
    pub fn burn_in(mut self, multiplier: f64) -> Self {
        self.config.demography.burn_in_multiplier = multiplier;
        self
    }

    /// Bottleneck size, ramp length and plateau duration.
    pub fn bottleneck(mut self, ne: usize, ramp: u64, duration: u64) -> Self {
        self.config.demography.bottleneck_ne = ne;
        self.config.demography.bottleneck_ramp = ramp;
        self.config.demography.bottleneck_duration = duration;
        self
    }

    /// Recovery target as a fraction of K and recovery ramp length.
    pub fn recovery(mut self, fraction: f64, ramp: u64) -> Self {
        self.config.demography.recovery_fraction = fraction;
        self.config.demography.recovery_ramp = ramp;
        self
    }

    pub fn tail(mut self, generations: u64) -> Self {
        self.config.demography.tail = generations;
        self
    }

    /// Directory and file-name prefix of the reports.
    pub fn output(mut self, dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        self.config.reporting.output_dir = dir.into();
        self.config.reporting.name = name.into();
        self
    }

    /// Reporting intervals before and after the end of burn-in.
    pub fn report_every(mut self, burn_in: u64, after: u64) -> Self {
        self.config.reporting.report_every_burnin = burn_in;
        self.config.reporting.report_every = after;
        self
    }

    pub fn individual_sample_size(mut self, size: usize) -> Self {
        self.config.reporting.individual_sample_size = size;
        self
    }

    pub fn pi_sample_size(mut self, size: usize) -> Self {
        self.config.reporting.pi_sample_size = size;
        self
    }

    pub fn pi_window(mut self, width: usize) -> Self {
        self.config.reporting.pi_window = width;
        self
    }

    pub fn genotypes(mut self, enabled: bool) -> Self {
        self.config.reporting.genotypes = enabled;
        self
    }

    /// Finish the configuration without initializing a run.
    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Build the simulation.
    pub fn build(self) -> Result<Simulation, SimulationError> {
        Simulation::new(self.config)
    }
}
