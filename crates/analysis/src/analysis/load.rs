//! Population-level genetic load.
//!
//! For every non-neutral mutation with population frequency `f`, selection
//! magnitude `|s|` and dominance `h`:
//!
//! - total load `Σ f·|s|`,
//! - realized load `Σ f²·|s| + 2·Σ f·(1−f)·|s|·h`,
//! - masked load `total − realized`.

use crate::analysis::utils::{fitness_values, mean, std_dev};
use purgesim_sim::simulation::{MutationCount, Population};
use purgesim_sim::storage::TsvRecord;

/// A load decomposition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadComponents {
    pub total: f64,
    pub realized: f64,
    pub masked: f64,
}

/// Population load from `(frequency, |s|, h)` triples.
pub fn population_load(sites: impl IntoIterator<Item = (f64, f64, f64)>) -> LoadComponents {
    let mut total = 0.0;
    let mut realized = 0.0;
    for (f, s, h) in sites {
        total += f * s;
        realized += f * f * s + 2.0 * f * (1.0 - f) * s * h;
    }
    LoadComponents {
        total,
        realized,
        masked: total - realized,
    }
}

pub const POPULATION_LOAD_HEADER: [&str; 11] = [
    "generation",
    "N",
    "targetNe",
    "softCapacity",
    "meanFitness",
    "sdFitness",
    "deleterious",
    "lethal",
    "totalLoad",
    "realizedLoad",
    "maskedLoad",
];

/// One row of the population summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationLoadRow {
    pub generation: u64,
    pub size: usize,
    pub target_ne: usize,
    pub soft_capacity: f64,
    pub mean_fitness: f64,
    pub sd_fitness: f64,
    /// Distinct non-neutral mutations present.
    pub deleterious: usize,
    /// Distinct lethal mutations present.
    pub lethal: usize,
    pub load: LoadComponents,
}

impl TsvRecord for PopulationLoadRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.generation.to_string(),
            self.size.to_string(),
            self.target_ne.to_string(),
            self.soft_capacity.to_string(),
            self.mean_fitness.to_string(),
            self.sd_fitness.to_string(),
            self.deleterious.to_string(),
            self.lethal.to_string(),
            self.load.total.to_string(),
            self.load.realized.to_string(),
            self.load.masked.to_string(),
        ]
    }
}

/// Summarize the load of `population` given its mutation counts.
pub fn population_summary(population: &Population, counts: &[MutationCount]) -> PopulationLoadRow {
    let size = population.size();
    let deleterious: Vec<&MutationCount> =
        counts.iter().filter(|c| !c.mutation.is_neutral()).collect();
    let load = population_load(deleterious.iter().map(|c| {
        (
            c.frequency(size),
            c.mutation.selection().abs(),
            c.mutation.dominance(),
        )
    }));

    let fitness = fitness_values(population);
    PopulationLoadRow {
        generation: population.generation(),
        size,
        target_ne: population.target_ne(),
        soft_capacity: population.soft_capacity(),
        mean_fitness: mean(&fitness),
        sd_fitness: std_dev(&fitness),
        deleterious: deleterious.len(),
        lethal: deleterious
            .iter()
            .filter(|c| c.mutation.mutation_type().is_lethal())
            .count(),
        load,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use purgesim_sim::genome::{Haplotype, Individual, Mutation, MutationType, MutationTypeId};
    use std::sync::Arc;

    #[test]
    fn test_fixed_mutation_is_fully_realized() {
        let load = population_load([(1.0, 0.2, 0.1)]);
        assert!((load.total - 0.2).abs() < 1e-12);
        assert!((load.realized - 0.2).abs() < 1e-12);
        assert!(load.masked.abs() < 1e-12);
    }

    #[test]
    fn test_recessive_rare_mutation_mostly_masked() {
        let load = population_load([(0.1, 0.5, 0.0)]);
        assert!((load.total - 0.05).abs() < 1e-12);
        assert!((load.realized - 0.005).abs() < 1e-12);
        assert!((load.masked - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_empty_catalog_is_zero() {
        assert_eq!(population_load(std::iter::empty()), LoadComponents::default());
    }

    #[test]
    fn test_population_summary() {
        let del = Arc::new(Mutation::new(
            1,
            MutationType::new(MutationTypeId(1), 0.0, -1.0),
            10,
            0,
        ));
        let neutral = Arc::new(Mutation::new(2, MutationType::neutral(), 20, 0));
        let mut a = Individual::new(
            0,
            Haplotype::from_mutations([del.clone(), neutral.clone()]),
            Haplotype::new(),
        );
        let mut b = Individual::ancestral(1);
        a.set_cached_fitness(1.0);
        b.set_cached_fitness(0.5);
        let pop = Population::new(vec![a, b], 2);
        let counts = pop.mutation_counts();
        let row = population_summary(&pop, &counts);

        assert_eq!(row.size, 2);
        assert_eq!(row.deleterious, 1);
        assert_eq!(row.lethal, 1);
        assert!((row.load.total - 0.25).abs() < 1e-12);
        assert!((row.mean_fitness - 0.75).abs() < 1e-12);
        assert!((row.sd_fitness - 0.25).abs() < 1e-12);
        assert_eq!(row.fields().len(), POPULATION_LOAD_HEADER.len());
    }

    proptest! {
        #[test]
        fn prop_population_load_identity(
            sites in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=0.5), 0..50)
        ) {
            let load = population_load(sites.iter().copied());
            let expanded: f64 = sites
                .iter()
                .map(|&(f, s, h)| f * s - f * f * s - 2.0 * f * (1.0 - f) * s * h)
                .sum();
            prop_assert!((load.masked - expanded).abs() < 1e-9);
            prop_assert!((load.total - load.realized - load.masked).abs() < 1e-12);
            prop_assert!(load.masked >= -1e-12);
            prop_assert!(load.realized <= load.total + 1e-12);
        }
    }
}
