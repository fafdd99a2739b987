//! Regularization losses for sparse neural retrieval training.
//!
//! This crate provides the FLOPS loss used when training SPLADE-style sparse
//! encoders. The loss penalizes dense co-activation of representation
//! dimensions across a batch, pushing the model toward activations that keep
//! inverted-index retrieval cheap. It consumes pre-computed activation
//! tensors and returns a scalar; the encoder, training loop and optimizer
//! live elsewhere.
//!
//! # Types
//!
//! - [`FlopsLoss`] - the regularization loss over a triplet of activation
//!   batches (anchor, positive, negative), or over a single batch via
//!   [`FlopsLoss::compute_batch`]
//! - [`FlopsConfig`] - hyperparameters (co-activation threshold, loss clamp)
//! - [`LossError`] / [`LossResult`] - error handling for shape and
//!   configuration failures
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use sparsereg_losses::{FlopsConfig, FlopsLoss};
//!
//! let loss = FlopsConfig::default().build().unwrap();
//!
//! // One activation row per example, one column per vocabulary entry.
//! let anchor = Array2::<f32>::zeros((4, 64));
//! let positive = Array2::<f32>::zeros((4, 64));
//! let negative = Array2::<f32>::zeros((4, 64));
//!
//! let value = loss
//!     .compute(anchor.view(), positive.view(), negative.view())
//!     .unwrap();
//! assert!(value <= loss.config().max_loss);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod flops;

pub use error::{LossError, LossResult};
pub use flops::{FlopsConfig, FlopsLoss};
