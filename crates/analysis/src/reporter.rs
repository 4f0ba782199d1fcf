//! Periodic reporting of the analytics.
//!
//! The reporter owns the five report files and its own generator for
//! subsampling, seeded from the run seed, so reporting never touches the
//! simulation's random stream.

use crate::analysis::catalog::{catalog_header, population_catalog, sample_catalog, MutationCatalogRow};
use crate::analysis::diversity::{pi_header, window_count, windowed_pi, PiRow};
use crate::analysis::individual::{individual_load_f2, IndividualLoadRow, INDIVIDUAL_LOAD_HEADER};
use crate::analysis::load::{population_summary, PopulationLoadRow, POPULATION_LOAD_HEADER};
use log::{debug, info};
use purgesim_sim::base::{sample_indices, SimRng};
use purgesim_sim::errors::StorageError;
use purgesim_sim::simulation::{ReportingConfig, Simulation};
use purgesim_sim::storage::{RecordingStrategy, ReportWriter};
use rand::SeedableRng;
use std::path::PathBuf;

/// Offsets the reporter stream from the simulation stream.
const REPORTER_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// The report files of one run.
pub struct Reporter {
    strategy: RecordingStrategy,
    reporting: ReportingConfig,
    genome_length: usize,
    rng: SimRng,
    population_load: ReportWriter<PopulationLoadRow>,
    individual_load: ReportWriter<IndividualLoadRow>,
    mutation_summary: ReportWriter<MutationCatalogRow>,
    mutation_sample: ReportWriter<MutationCatalogRow>,
    pi: ReportWriter<PiRow>,
}

impl Reporter {
    /// Create the report files for `sim` and write their headers.
    pub fn create(sim: &Simulation) -> Result<Self, StorageError> {
        let reporting = sim.config().reporting.clone();
        let strategy = RecordingStrategy::new(sim.schedule(), &reporting);
        let genome_length = sim.architecture().map().len();
        let windows = window_count(genome_length, reporting.pi_window);
        let genotypes = reporting.genotypes;

        let reporter = Self {
            strategy,
            genome_length,
            rng: SimRng::seed_from_u64(sim.seed() ^ REPORTER_STREAM),
            population_load: ReportWriter::create(reporting.path_for("popLoad"), &POPULATION_LOAD_HEADER)?,
            individual_load: ReportWriter::create(reporting.path_for("indLoad"), &INDIVIDUAL_LOAD_HEADER)?,
            mutation_summary: ReportWriter::create(
                reporting.path_for("mutSummary"),
                &catalog_header(genotypes),
            )?,
            mutation_sample: ReportWriter::create(
                reporting.path_for("mutSummarySample"),
                &catalog_header(genotypes),
            )?,
            pi: ReportWriter::create(reporting.path_for("pi"), &pi_header(windows))?,
            reporting,
        };
        info!(
            "Writing reports to {} ({} recorded generations planned)",
            reporter.reporting.output_dir.display(),
            strategy.count()
        );
        Ok(reporter)
    }

    pub fn strategy(&self) -> &RecordingStrategy {
        &self.strategy
    }

    /// Paths of the five report files.
    pub fn paths(&self) -> Vec<PathBuf> {
        vec![
            self.population_load.path().to_path_buf(),
            self.individual_load.path().to_path_buf(),
            self.mutation_summary.path().to_path_buf(),
            self.mutation_sample.path().to_path_buf(),
            self.pi.path().to_path_buf(),
        ]
    }

    /// Rows written to the population summary so far.
    pub fn rows_written(&self) -> u64 {
        self.population_load.rows_written()
    }

    /// Write all reports if the current generation is on the duty cycle.
    ///
    /// Returns whether a report was written.
    pub fn record(&mut self, sim: &Simulation) -> Result<bool, StorageError> {
        if !self.strategy.should_record(sim.generation()) {
            return Ok(false);
        }
        self.report(sim)?;
        Ok(true)
    }

    /// Write one row to every report, regardless of the duty cycle.
    pub fn report(&mut self, sim: &Simulation) -> Result<(), StorageError> {
        let population = sim.population();
        let generation = population.generation();
        let size = population.size();
        let counts = population.mutation_counts();
        let genotypes = self.reporting.genotypes;

        let summary = population_summary(population, &counts);
        self.population_load.append(&summary)?;

        let sample = sample_indices(&mut self.rng, size, self.reporting.individual_sample_size);
        let individuals: Vec<_> = sample.iter().filter_map(|&i| population.get(i)).collect();
        self.individual_load.append(&IndividualLoadRow {
            generation,
            loads: individuals.iter().map(|ind| individual_load_f2(ind)).collect(),
            fitness: individuals
                .iter()
                .map(|ind| ind.cached_fitness().map_or(1.0, |w| w.get()))
                .collect(),
        })?;

        self.mutation_summary.append(&MutationCatalogRow {
            generation,
            records: population_catalog(population, &counts, genotypes),
            genotypes,
        })?;
        self.mutation_sample.append(&MutationCatalogRow {
            generation,
            records: sample_catalog(population, &counts, &sample, genotypes),
            genotypes,
        })?;

        let pi_sample = sample_indices(&mut self.rng, size, self.reporting.pi_sample_size);
        self.pi.append(&PiRow {
            generation,
            values: windowed_pi(population, &pi_sample, self.genome_length, self.reporting.pi_window),
        })?;

        debug!(
            "Generation {generation}: reported N={size}, total load {:.4}, mean fitness {:.4}",
            summary.load.total, summary.mean_fitness
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purgesim_sim::simulation::SimulationBuilder;

    fn simulation(dir: &std::path::Path, genotypes: bool) -> Simulation {
        SimulationBuilder::new()
            .capacity(20)
            .seed(11)
            .genome(40, 6, 2)
            .deleterious_types(10)
            .mutation_rate(1e-3)
            .burn_in(1.0)
            .bottleneck(10, 2, 2)
            .recovery(1.0, 2)
            .tail(2)
            .report_every(5, 2)
            .pi_window(50)
            .genotypes(genotypes)
            .output(dir, "unit")
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_writes_headers() {
        let dir = tempfile::tempdir().unwrap();
        let sim = simulation(dir.path(), false);
        let reporter = Reporter::create(&sim).unwrap();
        for path in reporter.paths() {
            let text = std::fs::read_to_string(&path).unwrap();
            assert_eq!(text.lines().count(), 1, "{}", path.display());
        }
        let pi = std::fs::read_to_string(dir.path().join("unit_pi.tsv")).unwrap();
        // 6 genes of 40 sites with 5 gaps = 245 sites, 5 windows of 50.
        assert_eq!(pi.trim_end().split('\t').count(), 1 + 5);
    }

    #[test]
    fn test_record_follows_duty_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = simulation(dir.path(), true);
        let mut reporter = Reporter::create(&sim).unwrap();
        let mut recorded = 0;
        while !sim.is_finished() {
            sim.step().unwrap();
            if reporter.record(&sim).unwrap() {
                recorded += 1;
            }
        }
        assert_eq!(recorded as usize, reporter.strategy().count());
        assert_eq!(reporter.rows_written(), recorded);
        for path in reporter.paths() {
            let text = std::fs::read_to_string(&path).unwrap();
            assert_eq!(text.lines().count() as u64, recorded + 1, "{}", path.display());
        }
    }

    #[test]
    fn test_report_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = simulation(dir.path(), false);
        sim.run_for(5).unwrap();
        let mut reporter = Reporter::create(&sim).unwrap();
        let before: Vec<u64> = sim.population().individuals().iter().map(|i| i.id()).collect();
        reporter.report(&sim).unwrap();
        reporter.report(&sim).unwrap();
        let after: Vec<u64> = sim.population().individuals().iter().map(|i| i.id()).collect();
        assert_eq!(before, after);

        let text = std::fs::read_to_string(dir.path().join("unit_popLoad.tsv")).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }
}
