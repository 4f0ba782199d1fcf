//! Utility functions for analysis module
//!
//! Shared helper functions used across analysis submodules.

use purgesim_sim::simulation::Population;

/// Calculate mean of a slice (0 when empty).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (0 for fewer than two values).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Cached fitness of every individual; individuals without a cached value
/// count as fully fit.
pub fn fitness_values(population: &Population) -> Vec<f64> {
    population
        .individuals()
        .iter()
        .map(|ind| ind.cached_fitness().map_or(1.0, |w| w.get()))
        .collect()
}
