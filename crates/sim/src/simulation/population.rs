//! Population management.
//!
//! The population owns the living individuals and the two demographic tags:
//! the target Ne set by the schedule and the soft capacity set by the
//! regulator.

use crate::genome::{Individual, MutationRef};
use rayon::prelude::*;
use std::collections::HashMap;

/// A mutation present in the population and its number of copies.
#[derive(Debug, Clone)]
pub struct MutationCount {
    pub mutation: MutationRef,
    /// Copies across all genomes of the living individuals.
    pub copies: usize,
}

impl MutationCount {
    /// Frequency among `2 · size` genomes.
    pub fn frequency(&self, size: usize) -> f64 {
        if size == 0 {
            0.0
        } else {
            self.copies as f64 / (2 * size) as f64
        }
    }
}

/// A population of diploid individuals.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    generation: u64,
    target_ne: usize,
    soft_capacity: f64,
}

impl Population {
    /// Create a population tagged with `capacity` as both target and soft
    /// capacity.
    pub fn new(individuals: Vec<Individual>, capacity: usize) -> Self {
        Self {
            individuals,
            generation: 0,
            target_ne: capacity,
            soft_capacity: capacity as f64,
        }
    }

    /// `size` mutation-free individuals with ids `0..size`.
    pub fn ancestral(size: usize) -> Self {
        let individuals = (0..size as u64).map(Individual::ancestral).collect();
        Self::new(individuals, size)
    }

    /// Get the current generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn target_ne(&self) -> usize {
        self.target_ne
    }

    pub fn set_target_ne(&mut self, target: usize) {
        self.target_ne = target;
    }

    pub fn soft_capacity(&self) -> f64 {
        self.soft_capacity
    }

    pub fn soft_capacity_mut(&mut self) -> &mut f64 {
        &mut self.soft_capacity
    }

    /// Number of offspring the current soft capacity asks for.
    pub fn offspring_target(&self) -> usize {
        self.soft_capacity.round().max(0.0) as usize
    }

    /// Age every individual by one generation.
    pub fn age_all(&mut self) {
        self.individuals.iter_mut().for_each(Individual::increment_age);
    }

    /// Append newborns.
    pub fn extend(&mut self, offspring: impl IntoIterator<Item = Individual>) {
        self.individuals.extend(offspring);
    }

    /// Keep only the individuals for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Individual) -> bool) {
        self.individuals.retain(keep);
    }

    /// Every mutation carried by a living individual with its copy number,
    /// ordered by mutation id.
    pub fn mutation_counts(&self) -> Vec<MutationCount> {
        let merged = self
            .individuals
            .par_iter()
            .fold(HashMap::new, |mut acc: HashMap<u64, MutationCount>, ind| {
                for hap in [ind.haplotype1(), ind.haplotype2()] {
                    for m in hap.iter() {
                        acc.entry(m.id())
                            .or_insert_with(|| MutationCount {
                                mutation: m.clone(),
                                copies: 0,
                            })
                            .copies += 1;
                    }
                }
                acc
            })
            .reduce(HashMap::new, |mut a, b| {
                for (id, count) in b {
                    a.entry(id)
                        .and_modify(|c| c.copies += count.copies)
                        .or_insert(count);
                }
                a
            });

        let mut counts: Vec<MutationCount> = merged.into_values().collect();
        counts.sort_unstable_by_key(|c| c.mutation.id());
        counts
    }
}
