//! Genome layout and rate maps.
//!
//! The genome is a row of equally long genes separated by single inert
//! sites. The inert sites are the only places a crossover can happen, which
//! keeps every gene intact during recombination. Genes are grouped into
//! chromosome groups; the inert site between two groups recombines with
//! probability 0.5, so groups assort independently.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Probability of a crossover between two chromosome groups.
pub const FREE_RECOMBINATION: f64 = 0.5;

/// A piecewise-constant per-site rate table.
///
/// Interval `i` covers positions `(ends[i-1], ends[i]]` (the first interval
/// starts at 0) and every site in it has rate `rates[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateMap {
    ends: Vec<usize>,
    rates: Vec<f64>,
}

impl RateMap {
    /// Create a rate map from inclusive interval ends and rates.
    pub fn new(ends: Vec<usize>, rates: Vec<f64>) -> Self {
        debug_assert_eq!(ends.len(), rates.len());
        debug_assert!(ends.windows(2).all(|w| w[0] < w[1]));
        Self { ends, rates }
    }

    /// Number of sites covered.
    pub fn len(&self) -> usize {
        self.ends.last().map_or(0, |&e| e + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Inclusive interval ends.
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Iterate `(start, end_inclusive, rate)` over all intervals.
    pub fn intervals(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.ends.iter().zip(&self.rates).enumerate().map(|(i, (&end, &rate))| {
            let start = if i == 0 { 0 } else { self.ends[i - 1] + 1 };
            (start, end, rate)
        })
    }

    /// Rate at a single site (0.0 past the end).
    pub fn rate_at(&self, position: usize) -> f64 {
        let i = self.ends.partition_point(|&e| e < position);
        self.rates.get(i).copied().unwrap_or(0.0)
    }

    /// Sum of per-site rates over the whole map.
    pub fn total_rate(&self) -> f64 {
        self.intervals()
            .map(|(start, end, rate)| (end - start + 1) as f64 * rate)
            .sum()
    }
}

/// One gene: a half-open range of mutable sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub start: usize,
    pub end: usize,
}

impl Gene {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        (self.start..self.end).contains(&position)
    }
}

/// Segmented genome with its mutation and recombination maps.
///
/// Built once by the architecture initializer and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicMap {
    gene_length: usize,
    genes_per_chromosome: usize,
    genes: Vec<Gene>,
    mutation_map: RateMap,
    recombination_map: RateMap,
}

impl GenomicMap {
    /// Lay out `gene_count` genes of `gene_length` sites over
    /// `chromosome_count` equal chromosome groups.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if any length, count or rate is not strictly
    /// positive, if the recombination rate exceeds 0.5, or if the genes do not
    /// split evenly into chromosome groups.
    pub fn new(
        gene_length: usize,
        gene_count: usize,
        chromosome_count: usize,
        mutation_rate: f64,
        recombination_rate: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("gene_length", gene_length),
            ("gene_count", gene_count),
            ("chromosome_count", chromosome_count),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { name, value: 0.0 });
            }
        }
        if !(mutation_rate > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "mutation_rate",
                value: mutation_rate,
            });
        }
        if !(recombination_rate > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "recombination_rate",
                value: recombination_rate,
            });
        }
        if recombination_rate > FREE_RECOMBINATION {
            return Err(ConfigError::OutOfRange {
                name: "recombination_rate",
                value: recombination_rate,
                min: 0.0,
                max: FREE_RECOMBINATION,
            });
        }
        if gene_count % chromosome_count != 0 {
            return Err(ConfigError::UnevenChromosomes {
                genes: gene_count,
                groups: chromosome_count,
            });
        }
        let genes_per_chromosome = gene_count / chromosome_count;

        let stride = gene_length + 1;
        let genes: Vec<Gene> = (0..gene_count)
            .map(|i| Gene {
                start: i * stride,
                end: i * stride + gene_length,
            })
            .collect();

        let mut ends = Vec::with_capacity(2 * gene_count);
        let mut mutation_rates = Vec::with_capacity(2 * gene_count);
        let mut recombination_rates = Vec::with_capacity(2 * gene_count);
        for (i, gene) in genes.iter().enumerate() {
            ends.push(gene.end - 1);
            mutation_rates.push(mutation_rate);
            recombination_rates.push(0.0);

            if i + 1 < gene_count {
                ends.push(gene.end);
                mutation_rates.push(0.0);
                recombination_rates.push(if (i + 1) % genes_per_chromosome == 0 {
                    FREE_RECOMBINATION
                } else {
                    recombination_rate
                });
            }
        }

        Ok(Self {
            gene_length,
            genes_per_chromosome,
            genes,
            mutation_map: RateMap::new(ends.clone(), mutation_rates),
            recombination_map: RateMap::new(ends, recombination_rates),
        })
    }

    /// Total number of sites, gaps included.
    pub fn len(&self) -> usize {
        self.mutation_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene_length(&self) -> usize {
        self.gene_length
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn genes_per_chromosome(&self) -> usize {
        self.genes_per_chromosome
    }

    pub fn chromosome_count(&self) -> usize {
        self.genes.len() / self.genes_per_chromosome
    }

    /// Index of the gene containing `position`, if it is inside a gene.
    pub fn gene_at(&self, position: usize) -> Option<usize> {
        let i = position / (self.gene_length + 1);
        self.genes.get(i).filter(|g| g.contains(position)).map(|_| i)
    }

    /// Index of the chromosome group containing `position`.
    pub fn chromosome_at(&self, position: usize) -> usize {
        (position / (self.gene_length + 1)) / self.genes_per_chromosome
    }

    pub fn mutation_map(&self) -> &RateMap {
        &self.mutation_map
    }

    pub fn recombination_map(&self) -> &RateMap {
        &self.recombination_map
    }
}
