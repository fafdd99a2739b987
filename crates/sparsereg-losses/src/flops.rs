//! FLOPS regularization loss over sparse activations.
//!
//! The loss estimates the expected number of floating-point operations a
//! sparse retrieval index would spend on the current representations: the
//! squared per-dimension mean absolute activation, summed across the
//! vocabulary. Keeping that estimate close to a target budget pushes the
//! encoder toward sparser activations.
//!
//! References
//! ----------
//! 1. [Minimizing FLOPs to Learn Efficient Sparse Representations](https://arxiv.org/pdf/2004.05665.pdf)
//! 2. [SPLADE: Sparse Lexical and Expansion Model for First Stage Ranking](https://arxiv.org/pdf/2107.05720.pdf)

use ndarray::{concatenate, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{LossError, LossResult};

/// Configuration for the FLOPS loss.
///
/// # Example
///
/// ```
/// use sparsereg_losses::FlopsConfig;
///
/// let config = FlopsConfig::default()
///     .with_threshold(10.0)
///     .with_max_loss(5.0);
/// assert_eq!(config.threshold, 10.0);
/// assert_eq!(config.max_loss, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlopsConfig {
    /// Target co-activation budget the loss is measured against.
    pub threshold: f32,
    /// Upper clamp applied to the loss value.
    pub max_loss: f32,
}

impl Default for FlopsConfig {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            max_loss: 1.0,
        }
    }
}

impl FlopsConfig {
    /// Sets the co-activation threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the upper clamp for the loss value.
    pub fn with_max_loss(mut self, max_loss: f32) -> Self {
        self.max_loss = max_loss;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::ConfigError`] if either hyperparameter is
    /// non-finite or negative.
    pub fn validate(&self) -> LossResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(LossError::ConfigError {
                message: format!(
                    "threshold must be finite and non-negative, got {}",
                    self.threshold
                ),
            });
        }
        if !self.max_loss.is_finite() || self.max_loss < 0.0 {
            return Err(LossError::ConfigError {
                message: format!(
                    "max_loss must be finite and non-negative, got {}",
                    self.max_loss
                ),
            });
        }
        Ok(())
    }

    /// Validates the configuration and builds the loss.
    pub fn build(self) -> LossResult<FlopsLoss> {
        self.validate()?;
        Ok(FlopsLoss::new(self))
    }
}

/// FLOPS loss, acting as a regularization loss over sparse activations.
///
/// The loss is computed over the concatenation of the anchor, positive and
/// negative activation batches:
///
/// `loss = clamp(|threshold - sum_v(mean_b(|activations|)^2)|, 0, max_loss)`
///
/// where `mean_b` averages over the concatenated batch axis and `sum_v` sums
/// over the vocabulary axis. The value is stateless: the struct only carries
/// its hyperparameters.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use sparsereg_losses::FlopsLoss;
///
/// let loss = FlopsLoss::default();
///
/// let anchor = array![[0.0_f32, 1.2, 0.0], [0.4, 0.0, 0.0]];
/// let positive = array![[0.0_f32, 0.9, 0.1], [0.5, 0.0, 0.0]];
/// let negative = array![[0.3_f32, 0.0, 0.0], [0.0, 0.0, 0.8]];
///
/// let value = loss
///     .compute(anchor.view(), positive.view(), negative.view())
///     .unwrap();
/// assert!((0.0..=1.0).contains(&value));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlopsLoss {
    config: FlopsConfig,
}

impl FlopsLoss {
    /// Creates a new FLOPS loss with the given configuration.
    ///
    /// The configuration is trusted as-is; use [`FlopsConfig::build`] for the
    /// validating path.
    pub fn new(config: FlopsConfig) -> Self {
        Self { config }
    }

    /// Returns the loss configuration.
    pub fn config(&self) -> &FlopsConfig {
        &self.config
    }

    /// Computes the loss over a triplet of activation batches.
    ///
    /// Each input is shaped `(batch, vocabulary)`; the three batches are
    /// concatenated along the batch axis before the reduction, so every row
    /// contributes equally regardless of which input it came from.
    ///
    /// # Arguments
    ///
    /// * `anchor` - Activations of the anchor (query) batch.
    /// * `positive` - Activations of the positive document batch.
    /// * `negative` - Activations of the negative document batch.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::ShapeMismatch`] if the vocabulary widths differ,
    /// or [`LossError::EmptyBatch`] if all three batches have zero rows.
    pub fn compute<'a>(
        &self,
        anchor: ArrayView2<'a, f32>,
        positive: ArrayView2<'a, f32>,
        negative: ArrayView2<'a, f32>,
    ) -> LossResult<f32> {
        let vocab = anchor.ncols();
        for batch in [&positive, &negative] {
            if batch.ncols() != vocab {
                return Err(LossError::ShapeMismatch {
                    expected: vec![batch.nrows(), vocab],
                    actual: batch.shape().to_vec(),
                });
            }
        }

        let activations = concatenate(Axis(0), &[anchor, positive, negative])?;
        self.compute_batch(activations.view())
    }

    /// Computes the loss over a single activation batch.
    ///
    /// This is the reduction [`compute`](Self::compute) applies to the
    /// concatenated triplet. It is exposed for training setups that
    /// regularize only one side of the retrieval pair (for instance
    /// document-only regularization).
    ///
    /// # Errors
    ///
    /// Returns [`LossError::EmptyBatch`] if the batch axis has zero rows.
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use sparsereg_losses::FlopsConfig;
    ///
    /// let loss = FlopsConfig::default().with_threshold(0.0).build().unwrap();
    /// let batch = array![[0.5_f32, 0.0], [0.1, 0.2]];
    ///
    /// // Mean absolute activations are [0.3, 0.1]; 0.3^2 + 0.1^2 = 0.1.
    /// let value = loss.compute_batch(batch.view()).unwrap();
    /// assert!((value - 0.1).abs() < 1e-6);
    /// ```
    pub fn compute_batch(&self, activations: ArrayView2<f32>) -> LossResult<f32> {
        let mean_abs = activations
            .mapv(f32::abs)
            .mean_axis(Axis(0))
            .ok_or(LossError::EmptyBatch)?;

        let co_activation = mean_abs.mapv(|m| m * m).sum();
        let loss = (self.config.threshold - co_activation).abs();

        // min/max instead of clamp so an unvalidated max_loss cannot panic.
        Ok(loss.min(self.config.max_loss).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_default_config() {
        let config = FlopsConfig::default();
        assert_eq!(config.threshold, 30.0);
        assert_eq!(config.max_loss, 1.0);
    }

    #[test]
    fn test_config_builder() {
        let config = FlopsConfig::default()
            .with_threshold(12.5)
            .with_max_loss(2.0);
        assert_eq!(config.threshold, 12.5);
        assert_eq!(config.max_loss, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_hyperparameters() {
        let nan_threshold = FlopsConfig::default().with_threshold(f32::NAN);
        nan_threshold
            .validate()
            .expect_err("NaN threshold should be rejected");

        let negative_clamp = FlopsConfig::default().with_max_loss(-1.0);
        negative_clamp
            .validate()
            .expect_err("negative max_loss should be rejected");

        let infinite = FlopsConfig::default().with_threshold(f32::INFINITY);
        infinite
            .validate()
            .expect_err("infinite threshold should be rejected");
    }

    #[test]
    fn test_build_validates() {
        assert!(FlopsConfig::default().build().is_ok());
        assert!(matches!(
            FlopsConfig::default().with_max_loss(f32::NAN).build(),
            Err(LossError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_zero_activations_saturate_at_max_loss() {
        let loss = FlopsLoss::default();
        let zeros = Array2::<f32>::zeros((2, 8));

        // Co-activation is 0, so the loss is |30 - 0| clamped to 1.
        let value = loss
            .compute(zeros.view(), zeros.view(), zeros.view())
            .unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_known_co_activation_value() {
        let loss = FlopsLoss::new(FlopsConfig {
            threshold: 0.0,
            max_loss: 10.0,
        });

        let anchor = array![[0.5_f32, 0.0]];
        let positive = array![[0.25_f32, 0.25]];
        let negative = array![[0.25_f32, 0.75]];

        // Column means of |x| over the 3 concatenated rows are [1/3, 1/3];
        // the co-activation is 2 * (1/3)^2 = 2/9.
        let value = loss
            .compute(anchor.view(), positive.view(), negative.view())
            .unwrap();
        assert!((value - 2.0 / 9.0).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn test_negative_activations_use_absolute_value() {
        let loss = FlopsLoss::new(FlopsConfig {
            threshold: 0.0,
            max_loss: 10.0,
        });

        let positives = array![[0.5_f32, 0.25]];
        let negatives = array![[-0.5_f32, -0.25]];

        let a = loss.compute_batch(positives.view()).unwrap();
        let b = loss.compute_batch(negatives.view()).unwrap();
        assert!((a - b).abs() < 1e-7);
    }

    #[test]
    fn test_vocab_mismatch_is_rejected() {
        let loss = FlopsLoss::default();
        let anchor = Array2::<f32>::zeros((2, 3));
        let positive = Array2::<f32>::zeros((2, 4));
        let negative = Array2::<f32>::zeros((2, 3));

        let err = loss
            .compute(anchor.view(), positive.view(), negative.view())
            .unwrap_err();
        assert!(matches!(err, LossError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_batches_are_rejected() {
        let loss = FlopsLoss::default();
        let empty = Array2::<f32>::zeros((0, 4));

        let err = loss
            .compute(empty.view(), empty.view(), empty.view())
            .unwrap_err();
        assert!(matches!(err, LossError::EmptyBatch));
    }

    #[test]
    fn test_single_empty_input_is_fine() {
        let loss = FlopsLoss::new(FlopsConfig {
            threshold: 0.0,
            max_loss: 10.0,
        });
        let empty = Array2::<f32>::zeros((0, 2));
        let positive = array![[0.2_f32, 0.4]];
        let negative = array![[0.4_f32, 0.2]];

        // The anchor contributes no rows; the mean runs over the two
        // document rows: [0.3, 0.3] -> 0.18.
        let value = loss
            .compute(empty.view(), positive.view(), negative.view())
            .unwrap();
        assert!((value - 0.18).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn test_zero_width_vocabulary() {
        let loss = FlopsLoss::default();
        let empty_vocab = Array2::<f32>::zeros((3, 0));

        // No dimensions to co-activate: the loss is |30 - 0| clamped to 1.
        let value = loss
            .compute(empty_vocab.view(), empty_vocab.view(), empty_vocab.view())
            .unwrap();
        assert_eq!(value, 1.0);
    }
}
