use crate::base::FitnessValue;
use crate::genome::{Haplotype, MutationRef};
use std::cmp::Ordering;

/// Genotype of an individual at one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zygosity {
    /// Neither haplotype carries the mutation.
    HomozygousReference,
    /// Exactly one haplotype carries the mutation.
    Heterozygous,
    /// Both haplotypes carry the mutation.
    HomozygousAlternate,
}

/// Classify the genotype of a diploid at `mutation`.
pub fn zygosity(haplotype1: &Haplotype, haplotype2: &Haplotype, mutation: &MutationRef) -> Zygosity {
    match (haplotype1.contains(mutation), haplotype2.contains(mutation)) {
        (true, true) => Zygosity::HomozygousAlternate,
        (false, false) => Zygosity::HomozygousReference,
        _ => Zygosity::Heterozygous,
    }
}

/// A diploid individual.
///
/// Ages count completed generations: newborns have age 0 and every living
/// individual ages by one at the start of each generation.
#[derive(Debug, Clone)]
pub struct Individual {
    id: u64,
    haplotype1: Haplotype,
    haplotype2: Haplotype,
    age: u32,
    /// `None` until the fitness has been computed.
    fitness: Option<FitnessValue>,
}

impl Individual {
    /// Create a newborn from two haplotypes.
    pub fn new(id: u64, haplotype1: Haplotype, haplotype2: Haplotype) -> Self {
        Self {
            id,
            haplotype1,
            haplotype2,
            age: 0,
            fitness: None,
        }
    }

    /// A newborn carrying no mutations.
    pub fn ancestral(id: u64) -> Self {
        Self::new(id, Haplotype::new(), Haplotype::new())
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn haplotype1(&self) -> &Haplotype {
        &self.haplotype1
    }

    #[inline]
    pub fn haplotype2(&self) -> &Haplotype {
        &self.haplotype2
    }

    /// Borrow both haplotypes as a pair of references.
    #[inline]
    pub fn haplotypes(&self) -> (&Haplotype, &Haplotype) {
        (&self.haplotype1, &self.haplotype2)
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[inline]
    pub fn increment_age(&mut self) {
        self.age += 1;
    }

    #[inline]
    pub fn is_newborn(&self) -> bool {
        self.age == 0
    }

    /// Return the cached fitness, or `None` if it has not been computed.
    #[inline]
    pub fn cached_fitness(&self) -> Option<FitnessValue> {
        self.fitness
    }

    #[inline]
    pub fn set_cached_fitness(&mut self, fitness: impl Into<FitnessValue>) {
        self.fitness = Some(fitness.into());
    }

    /// Genotype at `mutation`.
    pub fn zygosity(&self, mutation: &MutationRef) -> Zygosity {
        zygosity(&self.haplotype1, &self.haplotype2, mutation)
    }

    /// Walk both haplotypes in position order and report every carried
    /// mutation once, together with its genotype.
    ///
    /// Two different mutations at the same position are reported separately,
    /// each as heterozygous.
    pub fn for_each_site(&self, mut f: impl FnMut(&MutationRef, Zygosity)) {
        let a = self.haplotype1.mutations();
        let b = self.haplotype2.mutations();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].position().cmp(&b[j].position()) {
                Ordering::Less => {
                    f(&a[i], Zygosity::Heterozygous);
                    i += 1;
                }
                Ordering::Greater => {
                    f(&b[j], Zygosity::Heterozygous);
                    j += 1;
                }
                Ordering::Equal => {
                    if a[i].id() == b[j].id() {
                        f(&a[i], Zygosity::HomozygousAlternate);
                    } else {
                        f(&a[i], Zygosity::Heterozygous);
                        f(&b[j], Zygosity::Heterozygous);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        a[i..].iter().for_each(|m| f(m, Zygosity::Heterozygous));
        b[j..].iter().for_each(|m| f(m, Zygosity::Heterozygous));
    }

    /// Unique mutations carried by either haplotype, in position order.
    pub fn unique_mutations(&self) -> Vec<MutationRef> {
        let mut out = Vec::with_capacity(self.haplotype1.len() + self.haplotype2.len());
        self.for_each_site(|m, _| out.push(m.clone()));
        out
    }
}
