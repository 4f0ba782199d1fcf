//! Recombination between the two haplotypes of a parent.
//!
//! Crossovers can only happen at sites with a positive recombination rate,
//! which the genomic map restricts to the inert gaps between genes. Gaps
//! with the same rate form one class. Sparse classes are sampled with
//! geometric skips between breakpoints, dense ones site by site.

use crate::errors::SimulationError;
use crate::genome::{GenomicMap, Haplotype, Individual};
use rand::Rng;
use rand_distr::{Distribution, Geometric};

/// Above this per-site rate a Bernoulli trial per site is cheaper than
/// geometric skipping.
const SPARSE_RATE_LIMIT: f64 = 0.1;

#[derive(Debug, Clone)]
struct RateClass {
    rate: f64,
    positions: Vec<usize>,
    geometric: Option<Geometric>,
}

impl RateClass {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut Vec<usize>) {
        match &self.geometric {
            Some(geo) => {
                let mut i = 0usize;
                loop {
                    let skip = geo.sample(rng);
                    i = match usize::try_from(skip).ok().and_then(|s| i.checked_add(s)) {
                        Some(next) => next,
                        None => break,
                    };
                    if i >= self.positions.len() {
                        break;
                    }
                    out.push(self.positions[i]);
                    i += 1;
                }
            }
            None => out.extend(
                self.positions
                    .iter()
                    .copied()
                    .filter(|_| rng.random::<f64>() < self.rate),
            ),
        }
    }
}

/// Breakpoint sampler and gamete builder.
#[derive(Debug, Clone)]
pub struct RecombinationModel {
    classes: Vec<RateClass>,
}

impl RecombinationModel {
    pub fn new(map: &GenomicMap) -> Result<Self, SimulationError> {
        let mut classes: Vec<RateClass> = Vec::new();
        for (start, end, rate) in map.recombination_map().intervals() {
            if rate <= 0.0 {
                continue;
            }
            let idx = match classes.iter().position(|c| c.rate == rate) {
                Some(i) => i,
                None => {
                    let geometric = if rate <= SPARSE_RATE_LIMIT {
                        Some(Geometric::new(rate).map_err(|e| {
                            SimulationError::Sampling(format!("recombination rate {rate}: {e}"))
                        })?)
                    } else {
                        None
                    };
                    classes.push(RateClass {
                        rate,
                        positions: Vec::new(),
                        geometric,
                    });
                    classes.len() - 1
                }
            };
            classes[idx].positions.extend(start..=end);
        }
        Ok(Self { classes })
    }

    /// Number of sites at which a crossover can happen.
    pub fn candidate_count(&self) -> usize {
        self.classes.iter().map(|c| c.positions.len()).sum()
    }

    /// Expected number of crossovers per gamete.
    pub fn expected_breakpoints(&self) -> f64 {
        self.classes
            .iter()
            .map(|c| c.rate * c.positions.len() as f64)
            .sum()
    }

    /// Sorted crossover positions for one meiosis.
    pub fn sample_breakpoints<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut breakpoints = Vec::new();
        for class in &self.classes {
            class.sample(rng, &mut breakpoints);
        }
        breakpoints.sort_unstable();
        breakpoints
    }

    /// Build one recombinant gamete from `parent`.
    ///
    /// The starting haplotype is chosen with probability one half; the copy
    /// switches strand after every breakpoint.
    pub fn make_gamete<R: Rng + ?Sized>(&self, parent: &Individual, rng: &mut R) -> Haplotype {
        let breakpoints = self.sample_breakpoints(rng);
        let (h1, h2) = parent.haplotypes();
        let mut strands = if rng.random::<bool>() { [h1, h2] } else { [h2, h1] };

        if breakpoints.is_empty() {
            return strands[0].clone();
        }

        let mut gamete = Haplotype::with_capacity(h1.len().max(h2.len()));
        let mut start = 0;
        for bp in breakpoints {
            gamete.extend_from_range(strands[0], start, bp);
            strands.swap(0, 1);
            start = bp;
        }
        gamete.extend_from_range(strands[0], start, usize::MAX);
        gamete
    }
}
