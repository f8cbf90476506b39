//! Core traits for attacks, classifiers and preprocessors.
//!
//! These traits define the API contracts at the seams of the attack
//! pipeline: the classifier under attack, the pluggable single-step
//! perturbation primitive, the attack entry point, and the preprocessing
//! defences.

use crate::error::Result;
use crate::primitives::Matrix;

/// A trained model under attack.
///
/// Anything that can produce per-class scores for a batch of inputs, plus
/// the loss gradient with respect to those inputs. How gradients are
/// computed internally is the implementor's business; attacks only consume
/// the resulting matrices.
///
/// Row i of every input, score and gradient matrix refers to sample i.
pub trait Classifier {
    /// Number of output classes.
    fn n_classes(&self) -> usize;

    /// Per-class scores for a batch.
    ///
    /// Returns an `n_samples × n_classes` matrix, row i corresponding to
    /// input i.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch shape doesn't match the model.
    fn predict(&self, x: &Matrix<f32>) -> Result<Matrix<f32>>;

    /// Gradient of the classification loss with respect to the input,
    /// given one-hot target labels.
    ///
    /// Returns a matrix with the same shape as `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if batch and label shapes don't match the model.
    fn loss_gradient(&self, x: &Matrix<f32>, targets: &Matrix<f32>) -> Result<Matrix<f32>>;
}

/// A single bounded perturbation step.
///
/// The iterative driver calls this once per iteration; any gradient-based
/// single-step attack can stand in. Implementations must be deterministic
/// for identical inputs unless `random_init` requests an initial random
/// offset.
pub trait SingleStepPerturber {
    /// Applies one perturbation step of magnitude `step_size` to `x`,
    /// steered by the fixed one-hot `targets`.
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatches or classifier failure.
    fn perturb(
        &self,
        x: &Matrix<f32>,
        targets: &Matrix<f32>,
        step_size: f32,
        random_init: bool,
    ) -> Result<Matrix<f32>>;
}

/// An adversarial attack.
///
/// The single entry point of the crate: a batch in, an adversarial batch
/// out. `y` carries optional one-hot target labels; when absent, untargeted
/// attacks fall back to the model's own predictions so ground truth never
/// leaks into the objective.
pub trait Attack {
    /// Generates adversarial samples for `x`.
    ///
    /// The caller's batch is never mutated; a fresh batch is returned with
    /// row i adversarial for sample i.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration (reported before any
    /// computation) or any classifier failure (aborts the call, no partial
    /// results).
    fn generate(&mut self, x: &Matrix<f32>, y: Option<&Matrix<f32>>) -> Result<Matrix<f32>>;
}

/// Trait for data transformers (preprocessing defences, scalers, etc.).
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformer is not fitted.
    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.fit(x)?;
        self.transform(x)
    }
}
