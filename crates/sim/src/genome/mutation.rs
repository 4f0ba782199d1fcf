//! Mutation types and mutation instances.
//!
//! A [`MutationType`] is an immutable (h, s) pair registered once at
//! initialization. A [`Mutation`] is one concrete allele: a type placed at a
//! genomic position in a given generation. Mutations are shared between
//! haplotypes through `Arc`, so a mutation lives exactly as long as some
//! genome still carries it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a registered mutation type.
///
/// The neutral type is always id 0; deleterious types are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MutationTypeId(pub u32);

impl MutationTypeId {
    /// Id of the single neutral type.
    pub const NEUTRAL: MutationTypeId = MutationTypeId(0);
}

impl fmt::Display for MutationTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// An immutable class of mutations sharing one dominance and one selection
/// coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationType {
    id: MutationTypeId,
    dominance: f64,
    selection: f64,
}

impl MutationType {
    /// Create a mutation type.
    pub fn new(id: MutationTypeId, dominance: f64, selection: f64) -> Self {
        Self {
            id,
            dominance,
            selection,
        }
    }

    /// The neutral type (h = 0.5, s = 0).
    pub fn neutral() -> Self {
        Self::new(MutationTypeId::NEUTRAL, 0.5, 0.0)
    }

    #[inline]
    pub fn id(&self) -> MutationTypeId {
        self.id
    }

    /// Dominance coefficient h.
    #[inline]
    pub fn dominance(&self) -> f64 {
        self.dominance
    }

    /// Selection coefficient s (≤ 0).
    #[inline]
    pub fn selection(&self) -> f64 {
        self.selection
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.selection == 0.0
    }

    #[inline]
    pub fn is_lethal(&self) -> bool {
        self.selection <= -1.0
    }
}

/// One mutation carried by one or more haplotypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    id: u64,
    mutation_type: MutationType,
    position: usize,
    origin_generation: u64,
}

/// Shared handle to a mutation.
pub type MutationRef = Arc<Mutation>;

impl Mutation {
    pub fn new(id: u64, mutation_type: MutationType, position: usize, origin_generation: u64) -> Self {
        Self {
            id,
            mutation_type,
            position,
            origin_generation,
        }
    }

    /// Unique id, assigned in creation order.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn mutation_type(&self) -> &MutationType {
        &self.mutation_type
    }

    #[inline]
    pub fn type_id(&self) -> MutationTypeId {
        self.mutation_type.id()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn origin_generation(&self) -> u64 {
        self.origin_generation
    }

    #[inline]
    pub fn selection(&self) -> f64 {
        self.mutation_type.selection()
    }

    #[inline]
    pub fn dominance(&self) -> f64 {
        self.mutation_type.dominance()
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.mutation_type.is_neutral()
    }
}
