//! Reproduction and survival.
//!
//! Each generation produces exactly the soft-capacity number of offspring by
//! random mating, then removes every individual that was alive before
//! reproduction. Generations therefore never overlap. Newborns finally pass
//! a viability filter scaled by their fitness (soft selection).

use crate::base::{child_seeds, SimRng};
use crate::errors::SimulationError;
use crate::evolution::{
    update_cached_fitness, GeneticArchitecture, MultiplicativeFitness, MutationModel,
    RecombinationModel,
};
use crate::genome::Individual;
use crate::simulation::Population;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Offspring production from a population.
#[derive(Debug, Clone)]
pub struct Reproduction {
    mutation: MutationModel,
    recombination: RecombinationModel,
    fitness: MultiplicativeFitness,
}

/// Everything sampled sequentially for one offspring before the parallel
/// construction step.
struct OffspringPlan {
    id: u64,
    parents: (usize, usize),
    /// First new mutation id of each gamete and the number of new mutations.
    mutations: [(u64, usize); 2],
    seed: u64,
}

impl Reproduction {
    pub fn new(architecture: &GeneticArchitecture) -> Result<Self, SimulationError> {
        Ok(Self {
            mutation: MutationModel::new(architecture.map(), architecture.catalog())?,
            recombination: RecombinationModel::new(architecture.map())?,
            fitness: MultiplicativeFitness,
        })
    }

    pub fn mutation_model(&self) -> &MutationModel {
        &self.mutation
    }

    pub fn recombination_model(&self) -> &RecombinationModel {
        &self.recombination
    }

    /// Produce `count` offspring with cached fitness.
    ///
    /// Parents are drawn uniformly with replacement; selfing is allowed.
    /// Individual ids start at `*next_individual_id` and mutation ids at
    /// `*next_mutation_id`; both counters are advanced.
    ///
    /// # Errors
    /// [`SimulationError::Extinction`] when the population is empty.
    pub fn produce_offspring(
        &self,
        population: &Population,
        count: usize,
        next_individual_id: &mut u64,
        next_mutation_id: &mut u64,
        rng: &mut SimRng,
    ) -> Result<Vec<Individual>, SimulationError> {
        let n = population.size();
        if n == 0 {
            return Err(SimulationError::Extinction {
                generation: population.generation(),
            });
        }

        // All draws from the master generator happen here, in a fixed order.
        let mut plans: Vec<OffspringPlan> = (0..count)
            .map(|_| {
                let parents = (rng.random_range(0..n), rng.random_range(0..n));
                let mut mutations = [(0, 0); 2];
                for slot in &mut mutations {
                    let k = self.mutation.sample_count(rng);
                    *slot = (*next_mutation_id, k);
                    *next_mutation_id += k as u64;
                }
                let id = *next_individual_id;
                *next_individual_id += 1;
                OffspringPlan {
                    id,
                    parents,
                    mutations,
                    seed: 0,
                }
            })
            .collect();
        for (plan, seed) in plans.iter_mut().zip(child_seeds(rng, count)) {
            plan.seed = seed;
        }

        let generation = population.generation();
        let individuals = population.individuals();
        let mut offspring: Vec<Individual> = plans
            .into_par_iter()
            .map(|plan| {
                let mut local_rng = SimRng::seed_from_u64(plan.seed);
                let [(first1, k1), (first2, k2)] = plan.mutations;

                let mut gamete1 = self
                    .recombination
                    .make_gamete(&individuals[plan.parents.0], &mut local_rng);
                self.mutation
                    .mutate(&mut gamete1, first1..first1 + k1 as u64, generation, &mut local_rng);

                let mut gamete2 = self
                    .recombination
                    .make_gamete(&individuals[plan.parents.1], &mut local_rng);
                self.mutation
                    .mutate(&mut gamete2, first2..first2 + k2 as u64, generation, &mut local_rng);

                Individual::new(plan.id, gamete1, gamete2)
            })
            .collect();
        update_cached_fitness(&self.fitness, &mut offspring);

        Ok(offspring)
    }
}

/// Remove every individual older than one generation.
pub fn enforce_survival(population: &mut Population) {
    population.retain(Individual::is_newborn);
}

/// Density-dependent viability of newborns.
///
/// Each newborn survives with probability `min(1, w · soft / n)`, with `n`
/// the number of newborns. Returns the number of survivors.
pub fn apply_soft_selection(population: &mut Population, rng: &mut SimRng) -> usize {
    let newborns = population.individuals().iter().filter(|i| i.is_newborn()).count();
    if newborns == 0 {
        return 0;
    }
    let scale = population.soft_capacity() / newborns as f64;

    let draws: Vec<f64> = (0..population.size()).map(|_| rng.random()).collect();
    let mut draws = draws.into_iter();
    population.retain(|ind| {
        let u = draws.next().unwrap_or(1.0);
        if !ind.is_newborn() {
            return true;
        }
        let w = ind.cached_fitness().map_or(1.0, |f| f.get());
        u < (w * scale).min(1.0)
    });
    population.individuals().iter().filter(|i| i.is_newborn()).count()
}
