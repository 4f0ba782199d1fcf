//! Per-mutation summaries.
//!
//! Lists the mutations present in the population (or carried by a random
//! subsample of individuals) with their type, effect, age and population
//! frequency. Genotype proportions across all individuals are optional
//! because they need a full pass over every individual.

use purgesim_sim::genome::{MutationTypeId, Zygosity};
use purgesim_sim::simulation::{MutationCount, Population};
use purgesim_sim::storage::{join_values, TsvRecord};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Share of individuals in each genotype class for one mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenotypeProportions {
    pub hom_ref: f64,
    pub hom_alt: f64,
    pub het: f64,
}

/// One mutation in a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub type_id: MutationTypeId,
    pub id: u64,
    /// Selection magnitude |s|.
    pub selection: f64,
    pub dominance: f64,
    pub origin_generation: u64,
    pub frequency: f64,
    pub genotypes: Option<GenotypeProportions>,
}

/// Number of homozygous-alternate and heterozygous carriers per mutation id.
pub fn genotype_counts(population: &Population) -> HashMap<u64, (usize, usize)> {
    population
        .individuals()
        .par_iter()
        .fold(HashMap::new, |mut acc: HashMap<u64, (usize, usize)>, ind| {
            ind.for_each_site(|m, z| {
                let entry = acc.entry(m.id()).or_default();
                match z {
                    Zygosity::HomozygousAlternate => entry.0 += 1,
                    Zygosity::Heterozygous => entry.1 += 1,
                    Zygosity::HomozygousReference => {}
                }
            });
            acc
        })
        .reduce(HashMap::new, |mut a, b| {
            for (id, (hom, het)) in b {
                let entry = a.entry(id).or_default();
                entry.0 += hom;
                entry.1 += het;
            }
            a
        })
}

fn proportions(counts: Option<&(usize, usize)>, size: usize) -> GenotypeProportions {
    if size == 0 {
        return GenotypeProportions::default();
    }
    let (hom, het) = counts.copied().unwrap_or((0, 0));
    let n = size as f64;
    GenotypeProportions {
        hom_ref: size.saturating_sub(hom + het) as f64 / n,
        hom_alt: hom as f64 / n,
        het: het as f64 / n,
    }
}

fn records<'a>(
    population: &Population,
    counts: impl Iterator<Item = &'a MutationCount>,
    genotypes: bool,
) -> Vec<MutationRecord> {
    let size = population.size();
    let tallies = genotypes.then(|| genotype_counts(population));
    counts
        .map(|c| {
            let m = &c.mutation;
            MutationRecord {
                type_id: m.type_id(),
                id: m.id(),
                selection: m.selection().abs(),
                dominance: m.dominance(),
                origin_generation: m.origin_generation(),
                frequency: c.frequency(size),
                genotypes: tallies
                    .as_ref()
                    .map(|t| proportions(t.get(&m.id()), size)),
            }
        })
        .collect()
}

/// Catalog of every mutation present in the population.
pub fn population_catalog(
    population: &Population,
    counts: &[MutationCount],
    genotypes: bool,
) -> Vec<MutationRecord> {
    records(population, counts.iter(), genotypes)
}

/// Catalog of the unique mutations carried by the individuals at `sample`
/// (indices into the population). Frequencies are population-wide.
pub fn sample_catalog(
    population: &Population,
    counts: &[MutationCount],
    sample: &[usize],
    genotypes: bool,
) -> Vec<MutationRecord> {
    let carried: BTreeSet<u64> = sample
        .iter()
        .filter_map(|&i| population.get(i))
        .flat_map(|ind| ind.unique_mutations())
        .map(|m| m.id())
        .collect();
    records(
        population,
        counts.iter().filter(|c| carried.contains(&c.mutation.id())),
        genotypes,
    )
}

pub fn catalog_header(genotypes: bool) -> Vec<&'static str> {
    let mut header = vec![
        "generation",
        "type",
        "id",
        "s",
        "h",
        "origin",
        "frequency",
    ];
    if genotypes {
        header.extend(["homRef", "homAlt", "het"]);
    }
    header
}

/// One row of a mutation catalog report; per-mutation values are
/// comma-joined within each column.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationCatalogRow {
    pub generation: u64,
    pub records: Vec<MutationRecord>,
    pub genotypes: bool,
}

impl TsvRecord for MutationCatalogRow {
    fn fields(&self) -> Vec<String> {
        let r = &self.records;
        let mut fields = vec![
            self.generation.to_string(),
            join_values(r.iter().map(|m| m.type_id.0)),
            join_values(r.iter().map(|m| m.id)),
            join_values(r.iter().map(|m| m.selection)),
            join_values(r.iter().map(|m| m.dominance)),
            join_values(r.iter().map(|m| m.origin_generation)),
            join_values(r.iter().map(|m| m.frequency)),
        ];
        if self.genotypes {
            let g = |f: fn(&GenotypeProportions) -> f64| {
                join_values(r.iter().map(|m| m.genotypes.as_ref().map_or(0.0, f)))
            };
            fields.push(g(|p| p.hom_ref));
            fields.push(g(|p| p.hom_alt));
            fields.push(g(|p| p.het));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purgesim_sim::genome::{Haplotype, Individual, Mutation, MutationRef, MutationType};
    use std::sync::Arc;

    fn mutation(id: u64, position: usize) -> MutationRef {
        Arc::new(Mutation::new(
            id,
            MutationType::new(MutationTypeId(3), 0.2, -0.1),
            position,
            7,
        ))
    }

    #[test]
    fn test_proportions_with_mismatched_size() {
        let p = proportions(Some(&(3, 2)), 4);
        assert_eq!(p.hom_ref, 0.0);
        assert_eq!(p.hom_alt, 0.75);
        assert_eq!(p.het, 0.5);
        assert_eq!(proportions(None, 0), GenotypeProportions::default());
    }

    fn population() -> Population {
        let a = mutation(1, 10);
        let b = mutation(2, 20);
        let c = mutation(3, 30);
        let inds = vec![
            Individual::new(
                0,
                Haplotype::from_mutations([a.clone(), b.clone()]),
                Haplotype::from_mutations([a.clone()]),
            ),
            Individual::new(1, Haplotype::from_mutations([a.clone()]), Haplotype::new()),
            Individual::new(2, Haplotype::new(), Haplotype::from_mutations([c])),
            Individual::ancestral(3),
        ];
        Population::new(inds, 4)
    }

    #[test]
    fn test_population_catalog_frequencies() {
        let pop = population();
        let counts = pop.mutation_counts();
        let cat = population_catalog(&pop, &counts, false);
        assert_eq!(cat.len(), 3);
        assert_eq!(cat[0].id, 1);
        assert!((cat[0].frequency - 3.0 / 8.0).abs() < 1e-12);
        assert_eq!(cat[0].selection, 0.1);
        assert_eq!(cat[0].origin_generation, 7);
        assert!(cat.iter().all(|r| r.genotypes.is_none()));
    }

    #[test]
    fn test_genotype_proportions_sum_to_one() {
        let pop = population();
        let counts = pop.mutation_counts();
        let cat = population_catalog(&pop, &counts, true);
        let a = cat[0].genotypes.unwrap();
        assert_eq!(a.hom_alt, 0.25);
        assert_eq!(a.het, 0.25);
        assert_eq!(a.hom_ref, 0.5);
        for r in &cat {
            let g = r.genotypes.unwrap();
            assert!((g.hom_ref + g.hom_alt + g.het - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sample_catalog_restricts_to_carriers() {
        let pop = population();
        let counts = pop.mutation_counts();
        let cat = sample_catalog(&pop, &counts, &[1, 3], false);
        let ids: Vec<u64> = cat.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
        assert!((cat[0].frequency - 3.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_layout() {
        let pop = population();
        let counts = pop.mutation_counts();
        let row = MutationCatalogRow {
            generation: 9,
            records: population_catalog(&pop, &counts, true),
            genotypes: true,
        };
        let fields = row.fields();
        assert_eq!(fields.len(), catalog_header(true).len());
        assert_eq!(fields[2], "1,2,3");
        assert_eq!(catalog_header(false).len(), 7);
    }
}
