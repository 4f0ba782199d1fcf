use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Absolute fitness of an individual, constrained to [0.0, 1.0].
///
/// Deleterious mutations only ever reduce fitness, so 1.0 is the
/// mutation-free optimum and 0.0 is a dead individual (for example one
/// homozygous for a lethal).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FitnessValue(f64);

impl FitnessValue {
    /// Fitness of an individual carrying a homozygous lethal.
    pub const LETHAL: FitnessValue = FitnessValue(0.0);

    /// Creates a new FitnessValue, clamping the input to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner f64 value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Converts to log scale.
    pub fn ln(self) -> LogFitnessValue {
        LogFitnessValue::from(self)
    }

    /// Returns true if the individual cannot survive.
    pub fn is_lethal(self) -> bool {
        self.0 == 0.0
    }
}

impl From<FitnessValue> for f64 {
    fn from(fitness: FitnessValue) -> Self {
        fitness.0
    }
}

impl From<f64> for FitnessValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Default for FitnessValue {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for FitnessValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Mul for FitnessValue {
    type Output = Self;

    /// Multiplies in log space so long products of small factors do not underflow.
    fn mul(self, rhs: Self) -> Self::Output {
        (self.ln() + rhs.ln()).exp()
    }
}

/// Natural logarithm of a fitness value, in [-∞, 0.0].
///
/// Fitness effects of independent sites combine multiplicatively, which is a
/// sum on this scale. A lethal factor is -∞ and absorbs every other term.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LogFitnessValue(f64);

impl LogFitnessValue {
    /// Creates a new LogFitnessValue, clamping positive values to 0.0.
    pub fn new(log_value: f64) -> Self {
        Self(log_value.min(0.0))
    }

    /// Log of a single multiplicative factor such as `1 + h·s`.
    ///
    /// Factors at or below zero map to -∞ (lethal).
    pub fn from_factor(factor: f64) -> Self {
        if factor <= 0.0 {
            Self(f64::NEG_INFINITY)
        } else {
            Self::new(factor.ln())
        }
    }

    /// Returns the inner log-scale value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Converts back to linear scale.
    pub fn exp(self) -> FitnessValue {
        FitnessValue::new(self.0.exp())
    }

    /// Returns true if this represents zero fitness (log = -∞).
    pub fn is_zero_fitness(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
}

impl From<f64> for LogFitnessValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<FitnessValue> for LogFitnessValue {
    fn from(fitness: FitnessValue) -> Self {
        Self(fitness.get().ln())
    }
}

impl From<LogFitnessValue> for FitnessValue {
    fn from(log_fitness: LogFitnessValue) -> Self {
        log_fitness.exp()
    }
}

impl Default for LogFitnessValue {
    fn default() -> Self {
        Self(0.0)
    }
}

impl Add for LogFitnessValue {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.0 + other.0)
    }
}

impl Sum for LogFitnessValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}
