//! Demographic schedule: the generation-indexed target Ne trajectory.
//!
//! A run starts with a burn-in at the carrying capacity K, then the target
//! declines linearly to the bottleneck size, stays there for the plateau,
//! recovers linearly to a fraction of K and finally runs for a fixed tail.

use crate::errors::{ConfigError, ScheduleError};
use crate::simulation::DemographyConfig;
use log::info;
use serde::{Deserialize, Serialize};

/// Target Ne by generation, with the phase boundaries of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicSchedule {
    capacity: usize,
    burn_in_end: u64,
    generations: Vec<u64>,
    targets: Vec<usize>,
    end: u64,
}

impl DemographicSchedule {
    /// Compute the schedule for carrying capacity `capacity`.
    ///
    /// # Errors
    /// Fails on a non-positive capacity, ramp length, duration, Ne or
    /// fraction, and if the resulting generations are not strictly
    /// increasing.
    pub fn build(capacity: usize, config: &DemographyConfig) -> Result<Self, ScheduleError> {
        if capacity == 0 {
            return Err(ConfigError::NonPositive {
                name: "capacity",
                value: 0.0,
            }
            .into());
        }
        config.validate()?;

        let k = capacity as f64;
        let t_btl = config.bottleneck_ne as f64;
        let t_recov = k * config.recovery_fraction;
        let l_btl = config.bottleneck_ramp;
        let l_recov = config.recovery_ramp;

        let burn_in_end = (k * config.burn_in_multiplier).round() as u64;

        let mut generations = Vec::new();
        let mut targets = Vec::new();

        let ramp_start = burn_in_end + l_btl;
        for i in 0..=l_btl {
            generations.push(ramp_start + i);
            targets.push(interpolate(k, t_btl, i, l_btl));
        }

        let plateau_start = ramp_start + l_btl + 1;
        for i in 0..config.bottleneck_duration {
            generations.push(plateau_start + i);
            targets.push(config.bottleneck_ne);
        }

        let recovery_start = plateau_start + config.bottleneck_duration;
        for i in 1..=l_recov {
            generations.push(recovery_start + i - 1);
            targets.push(interpolate(t_btl, t_recov, i, l_recov));
        }

        if let Some(w) = generations.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ScheduleError::NonMonotonic {
                previous: w[0],
                next: w[1],
            });
        }

        let last = generations.last().copied().unwrap_or(burn_in_end);
        let end = last + config.tail;

        info!(
            "Demographic schedule: burn-in ends at {burn_in_end}, bottleneck of {} from {} to {}, end at {end}",
            config.bottleneck_ne,
            plateau_start,
            recovery_start - 1
        );

        Ok(Self {
            capacity,
            burn_in_end,
            generations,
            targets,
            end,
        })
    }

    /// Carrying capacity K.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// First generation of the regulator window.
    pub fn burn_in_end(&self) -> u64 {
        self.burn_in_end
    }

    /// Final generation of the run.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Scheduled target for exactly this generation, if any.
    pub fn target_at(&self, generation: u64) -> Option<usize> {
        self.generations
            .binary_search(&generation)
            .ok()
            .map(|i| self.targets[i])
    }

    /// Whether the regulator is active in this generation.
    pub fn in_regulator_window(&self, generation: u64) -> bool {
        (self.burn_in_end..=self.end).contains(&generation)
    }

    /// `(generation, target)` pairs in order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.generations.iter().copied().zip(self.targets.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

/// `round(from + (to − from) · i / steps)`, never below 1.
fn interpolate(from: f64, to: f64, i: u64, steps: u64) -> usize {
    let value = from + (to - from) * i as f64 / steps as f64;
    (value.round() as usize).max(1)
}
