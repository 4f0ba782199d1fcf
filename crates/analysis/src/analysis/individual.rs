//! Individual-level genetic load.
//!
//! Computed per individual over its unique non-neutral mutations (`Lmut`),
//! split into homozygous and heterozygous classes. With `f11` and `f01` the
//! class fractions, `sHom`/`sHet` the mean |s| of each class and `shHet` the
//! mean |s|·h over heterozygous mutations:
//!
//! ```text
//! realized = Lmut · (f11·sHom + f01·shHet)
//! masked   = Lmut · f01 · (0.5·sHet − shHet)
//! total    = Lmut · (f11·sHom + 0.5·f01·sHet)
//! ```
//!
//! This is a different estimator from the population-level decomposition in
//! [`crate::analysis::load`] and the two are reported side by side.

use crate::analysis::utils::mean;
use purgesim_sim::genome::{Individual, Zygosity};
use purgesim_sim::storage::{join_values, TsvRecord};

/// Load decomposition of one individual.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndividualLoad {
    pub id: u64,
    /// Unique non-neutral mutations carried.
    pub mutations: usize,
    pub f11: f64,
    pub f01: f64,
    pub s_hom: f64,
    pub s_het: f64,
    pub sh_het: f64,
    pub realized: f64,
    pub masked: f64,
    pub total: f64,
}

/// Individual load from the `(|s|, h)` pairs of the homozygous and the
/// heterozygous mutations.
pub fn load_from_classes_f2(id: u64, homozygous: &[(f64, f64)], heterozygous: &[(f64, f64)]) -> IndividualLoad {
    let n = homozygous.len() + heterozygous.len();
    if n == 0 {
        return IndividualLoad {
            id,
            ..Default::default()
        };
    }
    let l = n as f64;
    let f11 = homozygous.len() as f64 / l;
    let f01 = heterozygous.len() as f64 / l;

    let s_hom = mean(&homozygous.iter().map(|&(s, _)| s).collect::<Vec<_>>());
    let s_het = mean(&heterozygous.iter().map(|&(s, _)| s).collect::<Vec<_>>());
    let sh_het = mean(&heterozygous.iter().map(|&(s, h)| s * h).collect::<Vec<_>>());

    IndividualLoad {
        id,
        mutations: n,
        f11,
        f01,
        s_hom,
        s_het,
        sh_het,
        realized: l * (f11 * s_hom + f01 * sh_het),
        masked: l * f01 * (0.5 * s_het - sh_het),
        total: l * (f11 * s_hom + 0.5 * f01 * s_het),
    }
}

/// Classify the mutations of `individual` and compute its load.
pub fn individual_load_f2(individual: &Individual) -> IndividualLoad {
    let mut homozygous = Vec::new();
    let mut heterozygous = Vec::new();
    individual.for_each_site(|m, z| {
        if m.is_neutral() {
            return;
        }
        let entry = (m.selection().abs(), m.dominance());
        match z {
            Zygosity::HomozygousAlternate => homozygous.push(entry),
            Zygosity::Heterozygous => heterozygous.push(entry),
            Zygosity::HomozygousReference => {}
        }
    });
    load_from_classes_f2(individual.id(), &homozygous, &heterozygous)
}

pub const INDIVIDUAL_LOAD_HEADER: [&str; 12] = [
    "generation",
    "id",
    "Lmut",
    "f11",
    "f01",
    "sHom",
    "sHet",
    "shHet",
    "realizedLoad",
    "maskedLoad",
    "totalLoad",
    "fitness",
];

/// One row of the individual summary: every column holds one comma-joined
/// value per sampled individual.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualLoadRow {
    pub generation: u64,
    pub loads: Vec<IndividualLoad>,
    pub fitness: Vec<f64>,
}

impl TsvRecord for IndividualLoadRow {
    fn fields(&self) -> Vec<String> {
        let col = |f: fn(&IndividualLoad) -> f64| join_values(self.loads.iter().map(f));
        vec![
            self.generation.to_string(),
            join_values(self.loads.iter().map(|l| l.id)),
            join_values(self.loads.iter().map(|l| l.mutations)),
            col(|l| l.f11),
            col(|l| l.f01),
            col(|l| l.s_hom),
            col(|l| l.s_het),
            col(|l| l.sh_het),
            col(|l| l.realized),
            col(|l| l.masked),
            col(|l| l.total),
            join_values(&self.fitness),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use purgesim_sim::genome::{Haplotype, Mutation, MutationRef, MutationType, MutationTypeId};
    use std::sync::Arc;

    fn mutation(id: u64, position: usize, h: f64, s: f64) -> MutationRef {
        Arc::new(Mutation::new(id, MutationType::new(MutationTypeId(1), h, s), position, 0))
    }

    #[test]
    fn test_no_mutations_all_zero() {
        let load = individual_load_f2(&Individual::ancestral(5));
        assert_eq!(load.id, 5);
        assert_eq!(load.mutations, 0);
        assert_eq!(load.total, 0.0);
        assert_eq!(load.realized, 0.0);
        assert_eq!(load.masked, 0.0);
    }

    #[test]
    fn test_worked_example() {
        let hom = mutation(1, 10, 0.1, -0.4);
        let het = mutation(2, 20, 0.25, -0.2);
        let neutral = Arc::new(Mutation::new(3, MutationType::neutral(), 30, 0));
        let ind = Individual::new(
            0,
            Haplotype::from_mutations([hom.clone(), het, neutral]),
            Haplotype::from_mutations([hom]),
        );
        let load = individual_load_f2(&ind);
        assert_eq!(load.mutations, 2);
        assert_eq!(load.f11, 0.5);
        assert_eq!(load.f01, 0.5);
        assert!((load.s_hom - 0.4).abs() < 1e-12);
        assert!((load.s_het - 0.2).abs() < 1e-12);
        assert!((load.sh_het - 0.05).abs() < 1e-12);
        // 2 · (0.5·0.4 + 0.5·0.05)
        assert!((load.realized - 0.45).abs() < 1e-12);
        // 2 · 0.5 · (0.1 − 0.05)
        assert!((load.masked - 0.05).abs() < 1e-12);
        // 2 · (0.5·0.4 + 0.25·0.2)
        assert!((load.total - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_only_heterozygous() {
        let load = load_from_classes_f2(0, &[], &[(0.2, 0.5), (0.4, 0.0)]);
        assert_eq!(load.f11, 0.0);
        assert_eq!(load.s_hom, 0.0);
        assert!((load.realized - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_row_width_matches_header() {
        let row = IndividualLoadRow {
            generation: 3,
            loads: vec![IndividualLoad::default(); 2],
            fitness: vec![1.0, 0.5],
        };
        let fields = row.fields();
        assert_eq!(fields.len(), INDIVIDUAL_LOAD_HEADER.len());
        assert_eq!(fields[11], "1,0.5");
    }

    proptest! {
        #[test]
        fn prop_individual_load_identity(
            hom in prop::collection::vec((0.0f64..=1.0, 0.0f64..=0.5), 0..30),
            het in prop::collection::vec((0.0f64..=1.0, 0.0f64..=0.5), 0..30),
        ) {
            let load = load_from_classes_f2(0, &hom, &het);
            prop_assert!((load.total - load.realized - load.masked).abs() < 1e-9);
            prop_assert!(load.masked >= -1e-12);
            let expected_sum = if hom.len() + het.len() > 0 { 1.0 } else { 0.0 };
            prop_assert!((load.f11 + load.f01 - expected_sum).abs() < 1e-12);
        }
    }
}
