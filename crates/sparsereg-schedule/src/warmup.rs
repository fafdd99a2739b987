//! Quadratic warmup schedule.
//!
//! Ramps the loss weight from zero to a target value over a fixed number of
//! optimizer steps, growing with the square of the elapsed fraction. A slow
//! start lets the ranking objective shape the model before the sparsity
//! regularizer carries real weight.
//!
//! References
//! ----------
//! 1. [Minimizing FLOPs to Learn Efficient Sparse Representations](https://arxiv.org/pdf/2004.05665.pdf)
//! 2. [SPLADE: Sparse Lexical and Expansion Model for First Stage Ranking](https://arxiv.org/pdf/2107.05720.pdf)

use std::fmt;

use tracing::debug;

use crate::WeightSchedule;

/// Quadratic warmup: `weight = target * (step / total)^2`.
///
/// The weight starts at `0.0` and is recomputed on every
/// [`step()`](WeightSchedule::step) until `total_steps` steps have elapsed;
/// from then on it stays frozen at its final value. With a non-negative
/// target the ramp is monotonically non-decreasing and ends at exactly the
/// target weight.
///
/// # Example
///
/// ```
/// use sparsereg_schedule::{QuadraticWarmup, WeightSchedule};
///
/// let mut schedule = QuadraticWarmup::new(1.0, 4);
///
/// schedule.step();
/// assert_eq!(schedule.get(), 0.0625); // (1/4)^2
///
/// schedule.step();
/// assert_eq!(schedule.get(), 0.25); // (2/4)^2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticWarmup {
    target_weight: f32,
    total_steps: u64,
    step: u64,
    weight: f32,
}

impl QuadraticWarmup {
    /// Creates a new quadratic warmup toward `target_weight` over
    /// `total_steps` optimizer steps.
    ///
    /// A `total_steps` of zero keeps the weight frozen at `0.0` forever.
    pub fn new(target_weight: f32, total_steps: u64) -> Self {
        Self {
            target_weight,
            total_steps,
            step: 0,
            weight: 0.0,
        }
    }

    /// Returns the target weight reached at the end of the ramp.
    pub fn target_weight(&self) -> f32 {
        self.target_weight
    }

    /// Returns the number of steps the ramp spans.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Returns the number of steps taken so far.
    pub fn current_step(&self) -> u64 {
        self.step
    }
}

impl Default for QuadraticWarmup {
    /// The SPLADE paper's training defaults: a `3e-5` target weight ramped
    /// over `10_000` steps.
    fn default() -> Self {
        Self::new(3e-5, 10_000)
    }
}

impl WeightSchedule for QuadraticWarmup {
    fn step(&mut self) {
        if self.step >= self.total_steps {
            return;
        }
        self.step += 1;

        let frac = self.step as f32 / self.total_steps as f32;
        self.weight = self.target_weight * frac * frac;

        if self.step == self.total_steps {
            debug!(
                target_weight = self.target_weight as f64,
                total_steps = self.total_steps,
                "loss-weight warmup reached its target"
            );
        }
    }

    fn get(&self) -> f32 {
        self.weight
    }
}

impl fmt::Display for QuadraticWarmup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuadraticWarmup(target_weight={}, total_steps={})",
            self.target_weight, self.total_steps
        )
    }
}
