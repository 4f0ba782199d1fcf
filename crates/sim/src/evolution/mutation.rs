//! Injection of new mutations into gametes.
//!
//! The number of new mutations on a gamete is Poisson with mean equal to the
//! summed per-site rate of the mutation map. Each mutation lands on a site
//! drawn proportionally to its rate and takes a type drawn proportionally to
//! the catalog weights.

use crate::errors::SimulationError;
use crate::evolution::MutationCatalog;
use crate::genome::{GenomicMap, Haplotype, Mutation, MutationType};
use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use std::sync::Arc;

/// Sampler for new mutations, built once from the architecture.
#[derive(Debug, Clone)]
pub struct MutationModel {
    /// `(start, length)` of every interval with a positive rate.
    intervals: Vec<(usize, usize)>,
    interval_index: WeightedIndex<f64>,
    types: Vec<MutationType>,
    type_index: WeightedIndex<f64>,
    expected: f64,
    count: Poisson<f64>,
}

impl MutationModel {
    pub fn new(map: &GenomicMap, catalog: &MutationCatalog) -> Result<Self, SimulationError> {
        let mut intervals = Vec::new();
        let mut interval_weights = Vec::new();
        for (start, end, rate) in map.mutation_map().intervals() {
            if rate > 0.0 {
                let len = end - start + 1;
                intervals.push((start, len));
                interval_weights.push(rate * len as f64);
            }
        }
        let expected: f64 = interval_weights.iter().sum();

        let interval_index = WeightedIndex::new(&interval_weights)
            .map_err(|e| SimulationError::Sampling(format!("mutation map: {e}")))?;
        let type_index = WeightedIndex::new(catalog.weights())
            .map_err(|e| SimulationError::Sampling(format!("mutation types: {e}")))?;
        let count = Poisson::new(expected)
            .map_err(|e| SimulationError::Sampling(format!("mutation count: {e}")))?;

        Ok(Self {
            intervals,
            interval_index,
            types: catalog.types().to_vec(),
            type_index,
            expected,
            count,
        })
    }

    /// Expected number of new mutations per gamete.
    pub fn expected_per_gamete(&self) -> f64 {
        self.expected
    }

    /// Number of new mutations for one gamete.
    pub fn sample_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.count.sample(rng) as usize
    }

    /// Draw one new mutation.
    pub fn sample_mutation<R: Rng + ?Sized>(&self, id: u64, generation: u64, rng: &mut R) -> Mutation {
        let (start, len) = self.intervals[self.interval_index.sample(rng)];
        let position = start + rng.random_range(0..len);
        let mutation_type = self.types[self.type_index.sample(rng)];
        Mutation::new(id, mutation_type, position, generation)
    }

    /// Add `ids.len()` new mutations to `haplotype`, using the given ids in
    /// order.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        haplotype: &mut Haplotype,
        ids: std::ops::Range<u64>,
        generation: u64,
        rng: &mut R,
    ) {
        for id in ids {
            haplotype.insert(Arc::new(self.sample_mutation(id, generation, rng)));
        }
    }
}
