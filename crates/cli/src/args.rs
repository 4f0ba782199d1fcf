use anyhow::{Context, Result};
use clap::Args;
use purgesim_sim::simulation::Configuration;
use std::path::PathBuf;

/// Parameters shared by every subcommand.
///
/// Values are layered: built-in defaults, then the `--config` file, then any
/// flag given on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Configuration file written by `purgesim init`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Carrying capacity K (initial size and pre-bottleneck Ne)
    #[arg(short = 'K', long)]
    pub capacity: Option<usize>,

    /// Random seed (default: drawn from OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Relative band around target Ne in which the regulator holds still
    #[arg(long)]
    pub regulator_tolerance: Option<f64>,

    /// Number of deleterious mutation types drawn from the DFE
    #[arg(long = "del-mut")]
    pub deleterious_types: Option<usize>,

    /// Fraction of deleterious types made lethal
    #[arg(long)]
    pub lethal_fraction: Option<f64>,

    /// Sites per gene
    #[arg(long)]
    pub gene_length: Option<usize>,

    /// Number of genes
    #[arg(long)]
    pub gene_count: Option<usize>,

    /// Number of independently assorting chromosome groups
    #[arg(long)]
    pub chromosomes: Option<usize>,

    /// Per-site mutation rate inside genes
    #[arg(long)]
    pub mutation_rate: Option<f64>,

    /// Crossover probability between adjacent genes
    #[arg(long)]
    pub recombination_rate: Option<f64>,

    /// Burn-in length as a multiple of K
    #[arg(long)]
    pub burn_in: Option<f64>,

    /// Target Ne during the bottleneck
    #[arg(long)]
    pub bottleneck_ne: Option<usize>,

    /// Generations over which Ne declines to the bottleneck size
    #[arg(long)]
    pub bottleneck_ramp: Option<u64>,

    /// Generations spent at the bottleneck size
    #[arg(long)]
    pub bottleneck_duration: Option<u64>,

    /// Recovery target as a fraction of K
    #[arg(long)]
    pub recovery_fraction: Option<f64>,

    /// Generations over which Ne recovers
    #[arg(long)]
    pub recovery_ramp: Option<u64>,

    /// Generations simulated after recovery
    #[arg(long)]
    pub tail: Option<u64>,

    /// Directory receiving the report files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix of the report file names
    #[arg(short = 'N', long)]
    pub name: Option<String>,

    /// Reporting interval during burn-in
    #[arg(long)]
    pub report_every_burnin: Option<u64>,

    /// Reporting interval after burn-in
    #[arg(long)]
    pub report_every: Option<u64>,

    /// Individuals sampled for the individual summary
    #[arg(long)]
    pub individual_sample: Option<usize>,

    /// Individuals sampled for windowed diversity
    #[arg(long)]
    pub pi_sample: Option<usize>,

    /// Width of the diversity windows in sites
    #[arg(long)]
    pub pi_window: Option<usize>,

    /// Report genotype proportions in the mutation catalogs
    #[arg(long)]
    pub genotypes: bool,
}

impl ConfigArgs {
    /// Resolve the final configuration and validate it.
    pub fn resolve(&self) -> Result<Configuration> {
        let mut config = match &self.config {
            Some(path) => Configuration::from_json_file(path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?,
            None => Configuration::default(),
        };
        self.apply(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn apply(&self, config: &mut Configuration) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        let execution = &mut config.execution;
        set(&mut execution.capacity, &self.capacity);
        if self.seed.is_some() {
            execution.seed = self.seed;
        }
        set(&mut execution.regulator_tolerance, &self.regulator_tolerance);

        let architecture = &mut config.architecture;
        set(&mut architecture.deleterious_types, &self.deleterious_types);
        set(&mut architecture.lethal_fraction, &self.lethal_fraction);
        set(&mut architecture.gene_length, &self.gene_length);
        set(&mut architecture.gene_count, &self.gene_count);
        set(&mut architecture.chromosome_count, &self.chromosomes);
        set(&mut architecture.mutation_rate, &self.mutation_rate);
        set(&mut architecture.recombination_rate, &self.recombination_rate);

        let demography = &mut config.demography;
        set(&mut demography.burn_in_multiplier, &self.burn_in);
        set(&mut demography.bottleneck_ne, &self.bottleneck_ne);
        set(&mut demography.bottleneck_ramp, &self.bottleneck_ramp);
        set(&mut demography.bottleneck_duration, &self.bottleneck_duration);
        set(&mut demography.recovery_fraction, &self.recovery_fraction);
        set(&mut demography.recovery_ramp, &self.recovery_ramp);
        set(&mut demography.tail, &self.tail);

        let reporting = &mut config.reporting;
        set(&mut reporting.output_dir, &self.output_dir);
        set(&mut reporting.name, &self.name);
        set(&mut reporting.report_every_burnin, &self.report_every_burnin);
        set(&mut reporting.report_every, &self.report_every);
        set(&mut reporting.individual_sample_size, &self.individual_sample);
        set(&mut reporting.pi_sample_size, &self.pi_sample);
        set(&mut reporting.pi_window, &self.pi_window);
        if self.genotypes {
            reporting.genotypes = true;
        }
    }
}
