use crate::simulation::{DemographicSchedule, ReportingConfig};
use serde::{Deserialize, Serialize};

/// Duty cycle deciding in which generations the analytics are recorded.
///
/// Recording happens in the final generation, every `every_burnin`
/// generations before the end of burn-in and every `every` generations from
/// then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingStrategy {
    pub burn_in_end: u64,
    pub end: u64,
    pub every_burnin: u64,
    pub every: u64,
}

impl RecordingStrategy {
    pub fn new(schedule: &DemographicSchedule, reporting: &ReportingConfig) -> Self {
        Self {
            burn_in_end: schedule.burn_in_end(),
            end: schedule.end(),
            every_burnin: reporting.report_every_burnin.max(1),
            every: reporting.report_every.max(1),
        }
    }

    /// Check if generation should be recorded.
    pub fn should_record(&self, generation: u64) -> bool {
        if generation == self.end {
            return true;
        }
        if generation > self.end {
            return false;
        }
        if generation < self.burn_in_end {
            generation % self.every_burnin == 0
        } else {
            generation % self.every == 0
        }
    }

    /// Number of recorded generations in `1..=end`.
    pub fn count(&self) -> usize {
        (1..=self.end).filter(|&g| self.should_record(g)).count()
    }
}
