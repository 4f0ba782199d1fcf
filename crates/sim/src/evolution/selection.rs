//! Fitness of individuals.
//!
//! Every carried mutation contributes one multiplicative factor: `1 + s` when
//! homozygous and `1 + h·s` when heterozygous. The factors are summed on the
//! log scale, so a homozygous lethal yields zero fitness no matter what else
//! the individual carries.

use crate::base::{FitnessValue, LogFitnessValue};
use crate::genome::{Individual, MutationRef, Zygosity};
use rayon::prelude::*;

/// Scores the fitness of a diploid individual.
pub trait IndividualFitness {
    fn individual_fitness(&self, individual: &Individual) -> FitnessValue;
}

/// Multiplicative fitness across sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiplicativeFitness;

impl MultiplicativeFitness {
    /// Log-scale factor of one mutation in the given genotype.
    pub fn site_factor(mutation: &MutationRef, zygosity: Zygosity) -> LogFitnessValue {
        let s = mutation.selection();
        match zygosity {
            Zygosity::HomozygousReference => LogFitnessValue::default(),
            Zygosity::Heterozygous => LogFitnessValue::from_factor(1.0 + mutation.dominance() * s),
            Zygosity::HomozygousAlternate => LogFitnessValue::from_factor(1.0 + s),
        }
    }
}

impl IndividualFitness for MultiplicativeFitness {
    fn individual_fitness(&self, individual: &Individual) -> FitnessValue {
        let mut total = LogFitnessValue::default();
        individual.for_each_site(|m, z| {
            if !m.is_neutral() {
                total = total + Self::site_factor(m, z);
            }
        });
        total.exp()
    }
}

/// Compute and cache the fitness of every individual that has none yet.
pub fn update_cached_fitness<F>(model: &F, individuals: &mut [Individual])
where
    F: IndividualFitness + Sync,
{
    individuals
        .par_iter_mut()
        .filter(|ind| ind.cached_fitness().is_none())
        .for_each(|ind| {
            let w = model.individual_fitness(ind);
            ind.set_cached_fitness(w);
        });
}
