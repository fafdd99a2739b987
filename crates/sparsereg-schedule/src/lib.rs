//! Loss-weight schedules for sparse neural retrieval training.
//!
//! Regularization losses such as the FLOPS loss are usually not applied at
//! full strength from the first optimizer step; the weight is ramped up so
//! the model can learn the ranking task before sparsity pressure kicks in.
//! This crate provides the schedules that produce that weight. Each schedule
//! implements the [`WeightSchedule`] trait and is driven by the training
//! loop: one [`step()`](WeightSchedule::step) per optimizer step, with
//! [`get()`](WeightSchedule::get) read wherever the weighted loss is formed.
//!
//! # Available Schedules
//!
//! - [`QuadraticWarmup`] - ramps the weight as `target * (step/total)^2` and
//!   freezes at the target
//! - [`ConstantWeight`] - a fixed weight, for runs without a ramp
//!
//! # Example
//!
//! ```
//! use sparsereg_schedule::{QuadraticWarmup, WeightSchedule};
//!
//! let mut schedule = QuadraticWarmup::new(3e-5, 10_000);
//! assert_eq!(schedule.get(), 0.0);
//!
//! // Once per optimizer step:
//! schedule.step();
//! assert!(schedule.get() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

mod constant;
mod warmup;

pub use constant::ConstantWeight;
pub use warmup::QuadraticWarmup;

/// A loss-weight schedule driven by the training loop.
///
/// Schedules are stateful: the loop calls [`step()`](Self::step) once per
/// optimizer step and reads the current weight with [`get()`](Self::get).
/// All configuration values are trusted; schedules have no error conditions.
pub trait WeightSchedule: Send + Sync + fmt::Display {
    /// Advances the schedule by one optimizer step.
    fn step(&mut self);

    /// Returns the current weight.
    fn get(&self) -> f32;
}

/// Configuration for different schedule types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeightScheduleConfig {
    /// Quadratic warmup configuration.
    QuadraticWarmup {
        /// Target weight reached at the end of the ramp.
        weight: f32,
        /// Number of optimizer steps the ramp spans.
        steps: u64,
    },

    /// Constant weight configuration.
    Constant {
        /// The fixed weight.
        weight: f32,
    },
}

impl WeightScheduleConfig {
    /// Returns the name of the schedule type.
    pub fn name(&self) -> &'static str {
        match self {
            WeightScheduleConfig::QuadraticWarmup { .. } => "QuadraticWarmup",
            WeightScheduleConfig::Constant { .. } => "Constant",
        }
    }
}

/// Creates a schedule from the given configuration.
///
/// # Example
///
/// ```
/// use sparsereg_schedule::{create_schedule, WeightScheduleConfig};
///
/// let config = WeightScheduleConfig::QuadraticWarmup {
///     weight: 3e-5,
///     steps: 10_000,
/// };
/// let mut schedule = create_schedule(&config);
/// schedule.step();
/// assert!(schedule.get() > 0.0);
/// ```
pub fn create_schedule(config: &WeightScheduleConfig) -> Box<dyn WeightSchedule> {
    match *config {
        WeightScheduleConfig::QuadraticWarmup { weight, steps } => {
            Box::new(QuadraticWarmup::new(weight, steps))
        }
        WeightScheduleConfig::Constant { weight } => Box::new(ConstantWeight::new(weight)),
    }
}
