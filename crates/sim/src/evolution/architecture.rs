//! Genetic architecture: the mutation-type catalog and the genome maps.
//!
//! Selection coefficients come from a gamma distribution of fitness effects
//! (DFE) with mean |s| of 0.05 and shape 0.5. A fixed fraction of the drawn
//! types is made lethal. Dominance follows a monotone h–s relationship, so
//! strongly deleterious mutations are almost fully recessive and weakly
//! deleterious ones are close to additive.

use crate::errors::ArchitectureError;
use crate::genome::{GenomicMap, MutationType, MutationTypeId};
use crate::simulation::ArchitectureConfig;
use log::info;
use rand::Rng;
use rand_distr::{Distribution, Gamma};
use serde::{Deserialize, Serialize};

/// Mean |s| of the gamma DFE.
pub const DFE_MEAN: f64 = 0.05;
/// Shape of the gamma DFE.
pub const DFE_SHAPE: f64 = 0.5;
/// Selection coefficient of a lethal mutation.
pub const LETHAL_SELECTION: f64 = -1.0;
/// Steepness of the h–s relationship.
pub const DOMINANCE_DECAY: f64 = 13.0;
/// Total weight of deleterious relative to neutral mutations in genes.
pub const DELETERIOUS_WEIGHT: f64 = 2.31;

/// Dominance coefficient for a selection coefficient: `0.5 · 10^(−13·|s|)`.
pub fn dominance_for(selection: f64) -> f64 {
    0.5 * 10f64.powf(-DOMINANCE_DECAY * selection.abs())
}

/// Draw `count` sorted deleterious selection coefficients.
///
/// `round(lethal_fraction · count)` coefficients, chosen uniformly without
/// replacement, are replaced with the lethal value. Draws beyond |s| = 1 are
/// clamped to lethal.
pub fn draw_selection_coefficients<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    lethal_fraction: f64,
) -> Result<Vec<f64>, ArchitectureError> {
    let gamma = Gamma::new(DFE_SHAPE, DFE_MEAN / DFE_SHAPE)
        .map_err(|e| ArchitectureError::Distribution(e.to_string()))?;

    let mut coefficients: Vec<f64> = (0..count)
        .map(|_| (-gamma.sample(rng)).max(LETHAL_SELECTION))
        .collect();
    coefficients.sort_by(f64::total_cmp);

    let n_lethal = ((lethal_fraction * count as f64).round() as usize).min(count);
    for i in rand::seq::index::sample(rng, count, n_lethal) {
        coefficients[i] = LETHAL_SELECTION;
    }
    coefficients.sort_by(f64::total_cmp);

    Ok(coefficients)
}

/// The registered mutation types and their relative mutation weights.
///
/// Index `i` of both vectors belongs to `MutationTypeId(i)`; index 0 is the
/// neutral type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationCatalog {
    types: Vec<MutationType>,
    weights: Vec<f64>,
}

impl MutationCatalog {
    /// Register the neutral type plus one type per deleterious coefficient.
    pub fn from_coefficients(coefficients: &[f64]) -> Self {
        let mut types = Vec::with_capacity(coefficients.len() + 1);
        let mut weights = Vec::with_capacity(coefficients.len() + 1);
        types.push(MutationType::neutral());
        weights.push(1.0);

        let per_type = if coefficients.is_empty() {
            0.0
        } else {
            DELETERIOUS_WEIGHT / coefficients.len() as f64
        };
        for (i, &s) in coefficients.iter().enumerate() {
            types.push(MutationType::new(MutationTypeId(i as u32 + 1), dominance_for(s), s));
            weights.push(per_type);
        }

        Self { types, weights }
    }

    /// Number of types, neutral included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[MutationType] {
        &self.types
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn get(&self, id: MutationTypeId) -> Option<&MutationType> {
        self.types.get(id.0 as usize)
    }

    pub fn neutral(&self) -> &MutationType {
        &self.types[0]
    }

    /// All non-neutral types.
    pub fn deleterious(&self) -> &[MutationType] {
        &self.types[1..]
    }
}

/// Everything fixed before generation 1: mutation types and genome maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticArchitecture {
    catalog: MutationCatalog,
    map: GenomicMap,
}

impl GeneticArchitecture {
    /// Build the architecture from its configuration.
    ///
    /// # Errors
    /// Fails if any length, count or rate is non-positive or if the genes do
    /// not split evenly into chromosome groups.
    pub fn initialize<R: Rng + ?Sized>(
        config: &ArchitectureConfig,
        rng: &mut R,
    ) -> Result<Self, ArchitectureError> {
        config.validate()?;

        let map = GenomicMap::new(
            config.gene_length,
            config.gene_count,
            config.chromosome_count,
            config.mutation_rate,
            config.recombination_rate,
        )?;

        let coefficients =
            draw_selection_coefficients(rng, config.deleterious_types, config.lethal_fraction)?;
        let catalog = MutationCatalog::from_coefficients(&coefficients);

        let n_lethal = catalog.deleterious().iter().filter(|t| t.is_lethal()).count();
        info!(
            "Genetic architecture: {} mutation types ({} lethal), {} genes on {} chromosomes, {} sites",
            catalog.len(),
            n_lethal,
            map.genes().len(),
            map.chromosome_count(),
            map.len()
        );

        Ok(Self { catalog, map })
    }

    pub fn catalog(&self) -> &MutationCatalog {
        &self.catalog
    }

    pub fn map(&self) -> &GenomicMap {
        &self.map
    }
}
