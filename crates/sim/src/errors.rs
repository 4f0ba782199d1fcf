use thiserror::Error;

/// Errors raised while validating a `Configuration` or any of its parts.
///
/// All of these are fatal at initialization: no generation is processed
/// once one of them has been returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter that must be strictly positive was zero or negative.
    #[error("Invalid parameter {name}: {value} (must be > 0)")]
    NonPositive { name: &'static str, value: f64 },

    /// A probability or fraction fell outside its allowed range.
    #[error("Invalid parameter {name}: {value} (must be between {min} and {max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Genes cannot be split into the requested number of equal chromosome groups.
    #[error("{genes} genes cannot be split into {groups} equal chromosome groups")]
    UnevenChromosomes { genes: usize, groups: usize },

    /// The configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

/// Errors raised while building the genetic architecture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArchitectureError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The gamma distribution rejected its parameters.
    #[error("Invalid distribution of fitness effects: {0}")]
    Distribution(String),
}

/// Errors raised while building the demographic schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Consecutive schedule entries are not strictly increasing in generation.
    #[error("Schedule is not monotonic: generation {next} follows {previous}")]
    NonMonotonic { previous: u64, next: u64 },
}

/// Errors raised while running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Architecture(#[from] ArchitectureError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// No living individual is left to reproduce.
    #[error("Population went extinct in generation {generation}")]
    Extinction { generation: u64 },

    /// The run already reached the final scheduled generation.
    #[error("Simulation already finished at generation {end}")]
    Finished { end: u64 },

    /// A sampling distribution could not be constructed.
    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by the append-only report artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create report {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}
