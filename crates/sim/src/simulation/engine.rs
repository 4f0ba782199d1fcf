//! Simulation engine.
//!
//! [`Simulation`] owns everything a run needs: the immutable architecture
//! and schedule, the population with its two demographic tags, the id
//! counters and the seeded generator. One call to [`Simulation::step`]
//! processes one full generation:
//!
//! 1. age every living individual,
//! 2. inside the regulator window, apply the scheduled target and adjust
//!    the soft capacity,
//! 3. produce the soft-capacity number of offspring,
//! 4. remove every individual that is not a newborn,
//! 5. apply soft selection to the newborns.

use crate::base::SimRng;
use crate::errors::SimulationError;
use crate::evolution::GeneticArchitecture;
use crate::simulation::regulator::Adjustment;
use crate::simulation::reproduction::{apply_soft_selection, enforce_survival};
use crate::simulation::{
    CapacityRegulator, Configuration, DemographicSchedule, Population, Reproduction,
};
use log::info;
use rand::{Rng, SeedableRng};

/// What happened in one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub generation: u64,
    /// Living individuals after soft selection.
    pub size: usize,
    pub target_ne: usize,
    pub soft_capacity: f64,
    /// Offspring produced before viability selection.
    pub offspring: usize,
    /// `None` outside the regulator window.
    pub adjustment: Option<Adjustment>,
}

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation {
    config: Configuration,
    seed: u64,
    architecture: GeneticArchitecture,
    schedule: DemographicSchedule,
    regulator: CapacityRegulator,
    reproduction: Reproduction,
    population: Population,
    next_individual_id: u64,
    next_mutation_id: u64,
    rng: SimRng,
}

impl Simulation {
    /// Initialize a run: validate the configuration, build the genetic
    /// architecture and the schedule, and create `K` mutation-free
    /// individuals.
    pub fn new(config: Configuration) -> Result<Self, SimulationError> {
        config.validate()?;

        let seed = config.execution.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SimRng::seed_from_u64(seed);

        let architecture = GeneticArchitecture::initialize(&config.architecture, &mut rng)?;
        let capacity = config.execution.capacity;
        let schedule = DemographicSchedule::build(capacity, &config.demography)?;
        let regulator = CapacityRegulator::new(config.execution.regulator_tolerance);
        let reproduction = Reproduction::new(&architecture)?;
        let population = Population::ancestral(capacity);

        info!(
            "Initialized population of {capacity} (seed {seed}); {:.3} new mutations per gamete",
            reproduction.mutation_model().expected_per_gamete()
        );

        Ok(Self {
            config,
            seed,
            architecture,
            schedule,
            regulator,
            reproduction,
            population,
            next_individual_id: capacity as u64,
            next_mutation_id: 0,
            rng,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The seed actually used, drawn from OS entropy when none was given.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn architecture(&self) -> &GeneticArchitecture {
        &self.architecture
    }

    pub fn schedule(&self) -> &DemographicSchedule {
        &self.schedule
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get the current generation number.
    pub fn generation(&self) -> u64 {
        self.population.generation()
    }

    /// Whether the final scheduled generation has been processed.
    pub fn is_finished(&self) -> bool {
        self.generation() >= self.schedule.end()
    }

    /// Number of mutation ids handed out so far.
    pub fn mutations_created(&self) -> u64 {
        self.next_mutation_id
    }

    /// Advance the simulation by one generation.
    ///
    /// # Errors
    /// [`SimulationError::Finished`] once `end` has been processed and
    /// [`SimulationError::Extinction`] when no individual survives.
    pub fn step(&mut self) -> Result<GenerationSummary, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::Finished {
                end: self.schedule.end(),
            });
        }

        self.population.increment_generation();
        let generation = self.population.generation();
        self.population.age_all();

        let adjustment = if self.schedule.in_regulator_window(generation) {
            if generation == self.schedule.burn_in_end() {
                info!("Burn-in complete at generation {generation}; regulator active");
            }
            if let Some(target) = self.schedule.target_at(generation) {
                if target != self.population.target_ne() {
                    info!("Generation {generation}: target Ne {target}");
                }
                self.population.set_target_ne(target);
            }
            let size = self.population.size();
            let target = self.population.target_ne();
            Some(
                self.regulator
                    .regulate(size, target, self.population.soft_capacity_mut()),
            )
        } else {
            None
        };

        let offspring_count = self.population.offspring_target();
        let offspring = self.reproduction.produce_offspring(
            &self.population,
            offspring_count,
            &mut self.next_individual_id,
            &mut self.next_mutation_id,
            &mut self.rng,
        )?;
        self.population.extend(offspring);
        enforce_survival(&mut self.population);
        let size = apply_soft_selection(&mut self.population, &mut self.rng);

        if size == 0 {
            return Err(SimulationError::Extinction { generation });
        }
        if generation == self.schedule.end() {
            info!("Reached final generation {generation} with {size} individuals");
        }

        Ok(GenerationSummary {
            generation,
            size,
            target_ne: self.population.target_ne(),
            soft_capacity: self.population.soft_capacity(),
            offspring: offspring_count,
            adjustment,
        })
    }

    /// Run until the final scheduled generation.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        self.run_with(|_, _| Ok(()))
    }

    /// Run until the final scheduled generation, calling `observe` after
    /// every generation.
    pub fn run_with<F>(&mut self, mut observe: F) -> Result<(), SimulationError>
    where
        F: FnMut(&Simulation, &GenerationSummary) -> Result<(), SimulationError>,
    {
        while !self.is_finished() {
            let summary = self.step()?;
            observe(self, &summary)?;
        }
        Ok(())
    }

    /// Run for a specific number of generations, stopping early at `end`.
    pub fn run_for(&mut self, generations: u64) -> Result<(), SimulationError> {
        for _ in 0..generations {
            if self.is_finished() {
                break;
            }
            self.step()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationBuilder;

    fn create_test_simulation() -> Simulation {
        SimulationBuilder::new()
            .capacity(30)
            .seed(42)
            .genome(50, 10, 2)
            .deleterious_types(20)
            .mutation_rate(1e-3)
            .burn_in(1.0)
            .bottleneck(5, 2, 3)
            .recovery(1.0, 2)
            .tail(3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_simulation_new() {
        let sim = create_test_simulation();
        assert_eq!(sim.population().size(), 30);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.seed(), 42);
        assert_eq!(sim.mutations_created(), 0);
    }

    #[test]
    fn test_step_advances_generation() {
        let mut sim = create_test_simulation();
        let summary = sim.step().unwrap();
        assert_eq!(summary.generation, 1);
        assert_eq!(sim.generation(), 1);
        assert_eq!(summary.offspring, 30);
        assert!(summary.adjustment.is_none());
        assert!(sim.population().individuals().iter().all(|i| i.is_newborn()));
    }

    #[test]
    fn test_run_ends_at_schedule_end() {
        let mut sim = create_test_simulation();
        sim.run().unwrap();
        assert_eq!(sim.generation(), sim.schedule().end());
        assert!(matches!(sim.step(), Err(SimulationError::Finished { .. })));
    }

    #[test]
    fn test_regulator_invariant_holds_during_run() {
        let mut sim = create_test_simulation();
        sim.run_with(|_, s| {
            if s.adjustment.is_some() {
                let t = s.target_ne as f64;
                assert!(s.soft_capacity >= t && s.soft_capacity <= 2.0 * t);
            }
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let trajectory = || {
            let mut sim = create_test_simulation();
            let mut sizes = Vec::new();
            sim.run_with(|_, s| {
                sizes.push((s.size, s.soft_capacity.to_bits()));
                Ok(())
            })
            .unwrap();
            (sizes, sim.mutations_created())
        };
        assert_eq!(trajectory(), trajectory());
    }

    #[test]
    fn test_run_for_stops_at_end() {
        let mut sim = create_test_simulation();
        let end = sim.schedule().end();
        sim.run_for(end + 50).unwrap();
        assert_eq!(sim.generation(), end);
    }

    #[test]
    fn test_extinction_is_terminal_and_keeps_written_rows() {
        use crate::genome::{Haplotype, Individual, Mutation, MutationType, MutationTypeId};
        use crate::storage::{ReportWriter, TsvRecord};
        use std::sync::Arc;

        struct SizeRow(GenerationSummary);

        impl TsvRecord for SizeRow {
            fn fields(&self) -> Vec<String> {
                vec![self.0.generation.to_string(), self.0.size.to_string()]
            }
        }

        let mut sim = SimulationBuilder::new()
            .capacity(30)
            .seed(9)
            .genome(50, 10, 2)
            .deleterious_types(20)
            .mutation_rate(1e-12)
            .burn_in(1.0)
            .bottleneck(5, 2, 3)
            .recovery(1.0, 2)
            .tail(3)
            .build()
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.tsv");
        let mut writer = ReportWriter::create(&path, &["generation", "size"]).unwrap();
        for _ in 0..3 {
            let summary = sim.step().unwrap();
            writer.append(&SizeRow(summary)).unwrap();
        }

        // Fix a lethal in every genome: no newborn can survive.
        let lethal = Arc::new(Mutation::new(
            u64::MAX,
            MutationType::new(MutationTypeId(1), 0.0, -1.0),
            7,
            3,
        ));
        let genome = Haplotype::from_mutations([lethal]);
        for ind in sim.population.individuals_mut() {
            *ind = Individual::new(ind.id(), genome.clone(), genome.clone());
        }

        let err = sim
            .run_with(|_, summary| writer.append(&SizeRow(*summary)).map_err(Into::into))
            .unwrap_err();
        assert!(matches!(err, SimulationError::Extinction { generation: 4 }));
        assert_eq!(sim.generation(), 4);
        assert!(sim.population().is_empty());

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "3\t30");
    }
}
