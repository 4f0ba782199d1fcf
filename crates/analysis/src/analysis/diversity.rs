//! Windowed heterozygosity (π) from neutral mutations.
//!
//! The genome is cut into fixed-width windows. For each sampled individual
//! and window, π is the number of positions at which its two haplotypes
//! carry different neutral alleles, divided by the window width. Values are
//! averaged over the sample.
//!
//! # Formula
//!
//! $$\pi_w = \frac{1}{n} \sum_{i=1}^{n} \frac{d_{i,w}}{W}$$
//!
//! where $d_{i,w}$ is the number of heterozygous neutral positions of
//! individual $i$ in window $w$ and $W$ the window width.

use purgesim_sim::genome::{Individual, MutationRef};
use purgesim_sim::simulation::Population;
use purgesim_sim::storage::TsvRecord;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Number of windows of `width` sites covering `genome_length` sites.
pub fn window_count(genome_length: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    genome_length.div_ceil(width)
}

/// Positions at which the neutral mutations of the two haplotypes differ.
pub fn neutral_differences(individual: &Individual) -> Vec<usize> {
    let a: Vec<&MutationRef> = individual.haplotype1().iter().filter(|m| m.is_neutral()).collect();
    let b: Vec<&MutationRef> = individual.haplotype2().iter().filter(|m| m.is_neutral()).collect();

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].position().cmp(&b[j].position()) {
            Ordering::Less => {
                out.push(a[i].position());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].position());
                j += 1;
            }
            Ordering::Equal => {
                if a[i].id() != b[j].id() {
                    out.push(a[i].position());
                }
                i += 1;
                j += 1;
            }
        }
    }
    out.extend(a[i..].iter().map(|m| m.position()));
    out.extend(b[j..].iter().map(|m| m.position()));
    out
}

/// Heterozygous neutral positions of one individual, counted per window.
pub fn individual_window_counts(individual: &Individual, width: usize, windows: usize) -> Vec<usize> {
    let mut counts = vec![0usize; windows];
    for p in neutral_differences(individual) {
        if let Some(c) = counts.get_mut(p / width) {
            *c += 1;
        }
    }
    counts
}

/// Windowed π averaged over the individuals at `sample`.
///
/// Returns `window_count(genome_length, width)` values, all zero when the
/// sample is empty. Counts are summed as integers so the result does not
/// depend on the thread pool.
pub fn windowed_pi(
    population: &Population,
    sample: &[usize],
    genome_length: usize,
    width: usize,
) -> Vec<f64> {
    let windows = window_count(genome_length, width);
    let sampled: Vec<&Individual> = sample.iter().filter_map(|&i| population.get(i)).collect();
    if sampled.is_empty() || windows == 0 {
        return vec![0.0; windows];
    }

    let totals = sampled
        .par_iter()
        .map(|ind| individual_window_counts(ind, width, windows))
        .reduce(
            || vec![0usize; windows],
            |mut acc, v| {
                acc.iter_mut().zip(v).for_each(|(a, x)| *a += x);
                acc
            },
        );
    let denominator = width as f64 * sampled.len() as f64;
    totals.into_iter().map(|t| t as f64 / denominator).collect()
}

/// Column names of the π report.
pub fn pi_header(windows: usize) -> Vec<String> {
    std::iter::once("generation".to_string())
        .chain((0..windows).map(|w| format!("window{w}")))
        .collect()
}

/// One row of the π report: one column per window.
#[derive(Debug, Clone, PartialEq)]
pub struct PiRow {
    pub generation: u64,
    pub values: Vec<f64>,
}

impl TsvRecord for PiRow {
    fn fields(&self) -> Vec<String> {
        std::iter::once(self.generation.to_string())
            .chain(self.values.iter().map(f64::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use purgesim_sim::genome::{Haplotype, Mutation, MutationType, MutationTypeId};
    use std::sync::Arc;

    fn neutral(id: u64, position: usize) -> MutationRef {
        Arc::new(Mutation::new(id, MutationType::neutral(), position, 0))
    }

    fn deleterious(id: u64, position: usize) -> MutationRef {
        Arc::new(Mutation::new(
            id,
            MutationType::new(MutationTypeId(1), 0.1, -0.1),
            position,
            0,
        ))
    }

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(100, 10), 10);
        assert_eq!(window_count(101, 10), 11);
        assert_eq!(window_count(5, 10), 1);
        assert_eq!(window_count(5, 0), 0);
    }

    #[test]
    fn test_neutral_differences() {
        let shared = neutral(1, 5);
        let ind = Individual::new(
            0,
            Haplotype::from_mutations([shared.clone(), neutral(2, 12), neutral(3, 40), deleterious(9, 60)]),
            Haplotype::from_mutations([shared, neutral(4, 12), neutral(5, 25)]),
        );
        assert_eq!(neutral_differences(&ind), vec![12, 25, 40]);
    }

    #[test]
    fn test_windowed_pi_average() {
        let a = Individual::new(
            0,
            Haplotype::from_mutations([neutral(1, 1), neutral(2, 2)]),
            Haplotype::new(),
        );
        let b = Individual::new(1, Haplotype::new(), Haplotype::from_mutations([neutral(3, 15)]));
        let pop = Population::new(vec![a, b], 2);
        let pi = windowed_pi(&pop, &[0, 1], 20, 10);
        assert_eq!(pi.len(), 2);
        assert!((pi[0] - 0.1).abs() < 1e-12);
        assert!((pi[1] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_windowed_pi_identical_across_pools() {
        let individuals: Vec<Individual> = (0..400)
            .map(|i| {
                let het = (i * 7 + i / 3) % 8;
                let hap = Haplotype::from_mutations((0..het).map(|p| neutral(i as u64 * 10 + p as u64, p)));
                Individual::new(i as u64, hap, Haplotype::new())
            })
            .collect();
        let pop = Population::new(individuals, 400);
        let sample: Vec<usize> = (0..400).collect();

        let in_pool = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| windowed_pi(&pop, &sample, 7, 7))
        };
        let expected: Vec<u64> = in_pool(1).iter().map(|v| v.to_bits()).collect();
        for threads in [2, 3, 4, 7, 8, 16] {
            let bits: Vec<u64> = in_pool(threads).iter().map(|v| v.to_bits()).collect();
            assert_eq!(bits, expected, "{threads} threads");
        }
    }

    #[test]
    fn test_individual_window_counts() {
        let ind = Individual::new(
            0,
            Haplotype::from_mutations([neutral(1, 0), neutral(2, 9), neutral(3, 10)]),
            Haplotype::new(),
        );
        assert_eq!(individual_window_counts(&ind, 10, 3), vec![2, 1, 0]);
    }

    #[test]
    fn test_empty_sample_is_zero() {
        let pop = Population::ancestral(3);
        assert_eq!(windowed_pi(&pop, &[], 30, 10), vec![0.0; 3]);
    }

    #[test]
    fn test_pi_row_layout() {
        let row = PiRow {
            generation: 2,
            values: vec![0.0, 0.25],
        };
        assert_eq!(row.fields(), vec!["2", "0", "0.25"]);
        assert_eq!(pi_header(2), vec!["generation", "window0", "window1"]);
    }

    proptest! {
        #[test]
        fn prop_pi_within_unit_interval(
            h1 in prop::collection::btree_set(0usize..200, 0..60),
            h2 in prop::collection::btree_set(0usize..200, 0..60),
            width in 1usize..50,
        ) {
            let hap = |set: &std::collections::BTreeSet<usize>, offset: u64| {
                Haplotype::from_mutations(set.iter().map(|&p| neutral(p as u64 + offset, p)))
            };
            let ind = Individual::new(0, hap(&h1, 0), hap(&h2, 1000));
            let pop = Population::new(vec![ind], 1);
            for v in windowed_pi(&pop, &[0], 200, width) {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
