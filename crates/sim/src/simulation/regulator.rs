//! Proportional feedback on the soft carrying capacity.
//!
//! Soft selection lets load-driven mortality pull the realized population
//! below its target. The regulator raises the number of offspring produced
//! while the population is short and lowers it again once it overshoots,
//! always keeping the soft capacity within `[target, 2 · target]`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Result of one regulator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Population within the tolerance band.
    Unchanged,
    /// Soft capacity raised after a deficit.
    Raised,
    /// Soft capacity lowered after a surplus.
    Lowered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityRegulator {
    tolerance: f64,
}

impl Default for CapacityRegulator {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

impl CapacityRegulator {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Adjust `soft` given `count` living individuals and target `target`.
    pub fn regulate(&self, count: usize, target: usize, soft: &mut f64) -> Adjustment {
        let t = target as f64;
        let n = count as f64;
        let ceiling = 2.0 * t;

        let adjustment = if n < t * (1.0 - self.tolerance) {
            let deficit = 1.0 - n / t;
            let raised = *soft + *soft * deficit;
            if raised > ceiling {
                warn!("Soft capacity capped at {ceiling} (count {count}, target {target})");
            }
            *soft = raised.min(ceiling);
            Adjustment::Raised
        } else if n > t * (1.0 + self.tolerance) {
            let surplus = n / t - 1.0;
            *soft = (*soft - *soft * surplus).max(t);
            Adjustment::Lowered
        } else {
            Adjustment::Unchanged
        };

        *soft = soft.clamp(t, ceiling);
        debug!("Regulator: count {count}, target {target}, soft capacity {soft:.2} ({adjustment:?})");
        adjustment
    }
}
