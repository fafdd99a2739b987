//! Constant weight schedule.

use std::fmt;

use crate::WeightSchedule;

/// A schedule that always reports the same weight.
///
/// Useful as a baseline when comparing against a warmup, and for experiments
/// that disable ramping altogether.
///
/// # Example
///
/// ```
/// use sparsereg_schedule::{ConstantWeight, WeightSchedule};
///
/// let mut schedule = ConstantWeight::new(3e-5);
/// schedule.step();
/// assert_eq!(schedule.get(), 3e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantWeight {
    weight: f32,
}

impl ConstantWeight {
    /// Creates a schedule fixed at `weight`.
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl WeightSchedule for ConstantWeight {
    fn step(&mut self) {}

    fn get(&self) -> f32 {
        self.weight
    }
}

impl fmt::Display for ConstantWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantWeight(weight={})", self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_does_not_change_weight() {
        let mut schedule = ConstantWeight::new(0.75);
        assert_eq!(schedule.get(), 0.75);
        for _ in 0..100 {
            schedule.step();
        }
        assert_eq!(schedule.get(), 0.75);
    }

    #[test]
    fn test_display() {
        let schedule = ConstantWeight::new(0.5);
        assert_eq!(schedule.to_string(), "ConstantWeight(weight=0.5)");
    }
}
