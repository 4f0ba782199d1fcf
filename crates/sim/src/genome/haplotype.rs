use crate::genome::MutationRef;
use std::sync::Arc;

/// A haplotype: the set of mutations carried by one genome copy.
///
/// Mutations are kept sorted by position with at most one mutation per
/// position, so range queries and two-haplotype merges are linear scans.
/// Cloning a haplotype only bumps reference counts.
#[derive(Debug, Clone, Default)]
pub struct Haplotype {
    mutations: Vec<MutationRef>,
}

impl Haplotype {
    /// Create an empty (ancestral) haplotype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a haplotype with room for `capacity` mutations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mutations: Vec::with_capacity(capacity),
        }
    }

    /// Build a haplotype from mutations in any order.
    ///
    /// When two mutations share a position the later one in `mutations` wins.
    pub fn from_mutations(mutations: impl IntoIterator<Item = MutationRef>) -> Self {
        let mut hap = Self::new();
        for m in mutations {
            hap.insert(m);
        }
        hap
    }

    /// Number of mutations carried.
    #[inline]
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Mutations in position order.
    #[inline]
    pub fn mutations(&self) -> &[MutationRef] {
        &self.mutations
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationRef> {
        self.mutations.iter()
    }

    /// The mutation at `position`, if any.
    pub fn at_position(&self, position: usize) -> Option<&MutationRef> {
        self.mutations
            .binary_search_by_key(&position, |m| m.position())
            .ok()
            .map(|i| &self.mutations[i])
    }

    /// Whether this haplotype carries exactly this mutation (not merely one at
    /// the same position).
    pub fn contains(&self, mutation: &MutationRef) -> bool {
        self.at_position(mutation.position())
            .is_some_and(|m| Arc::ptr_eq(m, mutation) || m.id() == mutation.id())
    }

    /// Add a mutation, replacing any mutation already at its position.
    pub fn insert(&mut self, mutation: MutationRef) {
        match self
            .mutations
            .binary_search_by_key(&mutation.position(), |m| m.position())
        {
            Ok(i) => self.mutations[i] = mutation,
            Err(i) => self.mutations.insert(i, mutation),
        }
    }

    /// Mutations with position in `[start, end)`.
    pub fn range(&self, start: usize, end: usize) -> &[MutationRef] {
        let lo = self.mutations.partition_point(|m| m.position() < start);
        let hi = self.mutations.partition_point(|m| m.position() < end);
        if lo >= hi {
            &[]
        } else {
            &self.mutations[lo..hi]
        }
    }

    /// Append the mutations of `other` in `[start, end)`.
    ///
    /// Segments must be appended left to right; the recombination operator
    /// relies on this to build gametes without re-sorting.
    pub fn extend_from_range(&mut self, other: &Haplotype, start: usize, end: usize) {
        let segment = other.range(start, end);
        debug_assert!(
            segment.first().is_none_or(|first| self
                .mutations
                .last()
                .is_none_or(|last| last.position() < first.position())),
            "segments must be appended in position order"
        );
        self.mutations.extend(segment.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Mutation, MutationType, MutationTypeId};

    fn mutation(id: u64, position: usize) -> MutationRef {
        let t = MutationType::new(MutationTypeId(1), 0.3, -0.01);
        Arc::new(Mutation::new(id, t, position, 1))
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut hap = Haplotype::new();
        hap.insert(mutation(1, 50));
        hap.insert(mutation(2, 10));
        hap.insert(mutation(3, 30));
        let positions: Vec<usize> = hap.iter().map(|m| m.position()).collect();
        assert_eq!(positions, vec![10, 30, 50]);
    }

    #[test]
    fn test_insert_replaces_same_position() {
        let mut hap = Haplotype::new();
        hap.insert(mutation(1, 10));
        hap.insert(mutation(2, 10));
        assert_eq!(hap.len(), 1);
        assert_eq!(hap.at_position(10).unwrap().id(), 2);
    }

    #[test]
    fn test_contains_is_identity_not_position() {
        let a = mutation(1, 10);
        let b = mutation(2, 10);
        let hap = Haplotype::from_mutations([a.clone()]);
        assert!(hap.contains(&a));
        assert!(!hap.contains(&b));
    }

    #[test]
    fn test_range_is_half_open() {
        let hap = Haplotype::from_mutations((0..10).map(|i| mutation(i, i as usize * 10)));
        let r = hap.range(20, 50);
        let positions: Vec<usize> = r.iter().map(|m| m.position()).collect();
        assert_eq!(positions, vec![20, 30, 40]);
        assert!(hap.range(91, 95).is_empty());
        assert!(hap.range(50, 20).is_empty());
    }

    #[test]
    fn test_extend_from_range_builds_recombinant() {
        let left = Haplotype::from_mutations([mutation(1, 5), mutation(2, 15)]);
        let right = Haplotype::from_mutations([mutation(3, 8), mutation(4, 25)]);
        let mut gamete = Haplotype::new();
        gamete.extend_from_range(&left, 0, 10);
        gamete.extend_from_range(&right, 10, 30);
        let ids: Vec<u64> = gamete.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
