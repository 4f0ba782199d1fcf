//! Simulation parameters and configuration.
//!
//! [`Configuration`] groups every scalar that defines a run. It can be
//! serialized to JSON and read back to reproduce a setup exactly; every field
//! has a documented default so partial files are accepted.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    pub architecture: ArchitectureConfig,
    pub demography: DemographyConfig,
    pub reporting: ReportingConfig,
}

impl Configuration {
    /// Check every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.execution.validate()?;
        self.architecture.validate()?;
        self.demography.validate()?;
        self.reporting.validate()
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Run-level parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Carrying capacity K: initial population size and pre-bottleneck Ne.
    pub capacity: usize,
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
    /// Relative band around target Ne inside which the regulator does nothing.
    pub regulator_tolerance: f64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            seed: None,
            regulator_tolerance: 0.01,
        }
    }
}

impl ExecutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_count("capacity", self.capacity)?;
        unit_interval("regulator_tolerance", self.regulator_tolerance)
    }
}

/// Parameters of the genetic architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureConfig {
    /// Number of deleterious mutation types drawn from the DFE.
    pub deleterious_types: usize,
    /// Fraction of deleterious types overwritten with the lethal coefficient.
    pub lethal_fraction: f64,
    /// Sites per gene.
    pub gene_length: usize,
    /// Number of genes.
    pub gene_count: usize,
    /// Number of independently assorting chromosome groups.
    pub chromosome_count: usize,
    /// Per-site, per-generation mutation rate inside genes.
    pub mutation_rate: f64,
    /// Crossover probability at each gap between genes of one chromosome group.
    pub recombination_rate: f64,
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self {
            deleterious_types: 500,
            lethal_fraction: 0.05,
            gene_length: 1000,
            gene_count: 1000,
            chromosome_count: 20,
            mutation_rate: 1e-7,
            recombination_rate: 1e-3,
        }
    }
}

impl ArchitectureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_count("deleterious_types", self.deleterious_types)?;
        unit_interval("lethal_fraction", self.lethal_fraction)?;
        positive_count("gene_length", self.gene_length)?;
        positive_count("gene_count", self.gene_count)?;
        positive_count("chromosome_count", self.chromosome_count)?;
        positive_real("mutation_rate", self.mutation_rate)?;
        positive_real("recombination_rate", self.recombination_rate)?;
        if self.gene_count % self.chromosome_count != 0 {
            return Err(ConfigError::UnevenChromosomes {
                genes: self.gene_count,
                groups: self.chromosome_count,
            });
        }
        Ok(())
    }
}

/// Parameters of the demographic trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographyConfig {
    /// Burn-in length as a multiple of the carrying capacity.
    pub burn_in_multiplier: f64,
    /// Target Ne during the bottleneck plateau.
    pub bottleneck_ne: usize,
    /// Generations over which Ne declines from K to the bottleneck size.
    pub bottleneck_ramp: u64,
    /// Generations spent at the bottleneck size.
    pub bottleneck_duration: u64,
    /// Recovery target as a fraction of K.
    pub recovery_fraction: f64,
    /// Generations over which Ne recovers.
    pub recovery_ramp: u64,
    /// Generations simulated after the recovery ramp.
    pub tail: u64,
}

impl Default for DemographyConfig {
    fn default() -> Self {
        Self {
            burn_in_multiplier: 10.0,
            bottleneck_ne: 10,
            bottleneck_ramp: 10,
            bottleneck_duration: 20,
            recovery_fraction: 1.0,
            recovery_ramp: 10,
            tail: 20,
        }
    }
}

impl DemographyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_real("burn_in_multiplier", self.burn_in_multiplier)?;
        positive_count("bottleneck_ne", self.bottleneck_ne)?;
        positive_count("bottleneck_ramp", self.bottleneck_ramp as usize)?;
        positive_count("bottleneck_duration", self.bottleneck_duration as usize)?;
        positive_real("recovery_fraction", self.recovery_fraction)?;
        positive_count("recovery_ramp", self.recovery_ramp as usize)?;
        positive_count("tail", self.tail as usize)
    }
}

/// Where and how often analytics are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Directory receiving the report files.
    pub output_dir: PathBuf,
    /// Prefix of every report file name.
    pub name: String,
    /// Reporting interval before the end of burn-in.
    pub report_every_burnin: u64,
    /// Reporting interval from the end of burn-in onwards.
    pub report_every: u64,
    /// Individuals sampled for the individual load summary and the
    /// subsample mutation catalog.
    pub individual_sample_size: usize,
    /// Maximum number of individuals sampled for windowed π.
    pub pi_sample_size: usize,
    /// Width of the π windows in sites.
    pub pi_window: usize,
    /// Also report genotype proportions in the mutation catalogs.
    pub genotypes: bool,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            name: "purgesim".to_string(),
            report_every_burnin: 500,
            report_every: 2,
            individual_sample_size: 20,
            pi_sample_size: 20,
            pi_window: 100_000,
            genotypes: false,
        }
    }
}

impl ReportingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_count("report_every_burnin", self.report_every_burnin as usize)?;
        positive_count("report_every", self.report_every as usize)?;
        positive_count("individual_sample_size", self.individual_sample_size)?;
        positive_count("pi_sample_size", self.pi_sample_size)?;
        positive_count("pi_window", self.pi_window)
    }

    /// Path of the report file with the given suffix.
    pub fn path_for(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{suffix}.tsv", self.name))
    }
}

fn positive_count(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositive { name, value: 0.0 });
    }
    Ok(())
}

fn positive_real(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}
