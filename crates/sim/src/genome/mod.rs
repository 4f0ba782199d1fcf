//! Genome representation.
//!
//! Haplotypes are sets of shared mutation handles; individuals are diploid
//! pairs of haplotypes with an age and a cached fitness. The genomic map
//! describes where mutations and crossovers can happen.

pub mod haplotype;
pub mod individual;
pub mod map;
pub mod mutation;

pub use haplotype::Haplotype;
pub use individual::{zygosity, Individual, Zygosity};
pub use map::{Gene, GenomicMap, RateMap, FREE_RECOMBINATION};
pub use mutation::{Mutation, MutationRef, MutationType, MutationTypeId};
