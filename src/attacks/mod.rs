//! Adversarial attacks.
//!
//! This module implements gradient-based evasion attacks:
//! - [`FastGradient`]: single bounded perturbation step (the base attack)
//! - [`BasicIterative`]: iterative refinement of the single step with
//!   norm-ball projection and per-sample early stopping
//!
//! # Example
//!
//! ```
//! use adversario::attacks::BasicIterative;
//! use adversario::classification::LinearSoftmax;
//! use adversario::prelude::*;
//!
//! let weights = Matrix::from_vec(2, 2, vec![2.0, -2.0, -1.0, 1.0]).unwrap();
//! let bias = Vector::from_slice(&[0.0, 0.0]);
//! let model = LinearSoftmax::new(weights, bias).unwrap();
//!
//! let x = Matrix::from_vec(2, 2, vec![1.0, 0.0, -1.0, 0.5]).unwrap();
//! let mut attack = BasicIterative::new(&model)
//!     .with_eps(0.3)
//!     .with_eps_step(0.1)
//!     .with_max_iter(10);
//! let adv = attack.generate(&x, None).unwrap();
//! assert_eq!(adv.shape(), x.shape());
//! ```

mod fast_gradient;
mod iterative;

pub use fast_gradient::FastGradient;
pub use iterative::{BasicIterative, Overrides};

use crate::error::{AdversarioError, Result};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use crate::utils::labels_from_scores;

/// Resolves the per-sample one-hot target labels for an attack run.
///
/// Caller-supplied labels are used verbatim after shape checks. Without
/// labels, a targeted attack is rejected; an untargeted attack queries the
/// classifier exactly once on the original batch and fixes its arg-max
/// predictions as the labels to move away from, so ground truth never leaks
/// into the objective.
pub(crate) fn resolve_targets(
    classifier: &dyn Classifier,
    x: &Matrix<f32>,
    y: Option<&Matrix<f32>>,
    targeted: bool,
) -> Result<Matrix<f32>> {
    match y {
        Some(labels) => {
            if labels.n_rows() != x.n_rows() {
                return Err(AdversarioError::dimension_mismatch(
                    format!("n_samples={}", x.n_rows()),
                    labels.n_rows(),
                ));
            }
            if labels.n_cols() != classifier.n_classes() {
                return Err(AdversarioError::dimension_mismatch(
                    format!("n_classes={}", classifier.n_classes()),
                    labels.n_cols(),
                ));
            }
            Ok(labels.clone())
        }
        None => {
            if targeted {
                return Err(AdversarioError::invalid_hyperparameter(
                    "y",
                    "None",
                    "target labels for a targeted attack",
                ));
            }
            let scores = classifier.predict(x)?;
            labels_from_scores(&scores)
        }
    }
}
