//! Reference classifier implementations.
//!
//! Attacks only need the [`Classifier`] trait; this module ships a linear
//! softmax model so the whole pipeline can run without an external
//! framework.

use crate::error::{AdversarioError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};

/// Linear softmax classifier.
///
/// Scores a batch as `softmax(xW + b)` and exposes the closed-form
/// cross-entropy loss gradient with respect to the input, which is what
/// gradient-based attacks consume.
///
/// # Example
///
/// ```
/// use adversario::classification::LinearSoftmax;
/// use adversario::prelude::*;
///
/// // Two features, two classes; class 1 likes large first features.
/// let weights = Matrix::from_vec(2, 2, vec![-1.0, 1.0, 0.0, 0.0]).unwrap();
/// let bias = Vector::from_slice(&[0.0, 0.0]);
/// let model = LinearSoftmax::new(weights, bias).unwrap();
///
/// let x = Matrix::from_vec(1, 2, vec![2.0, 0.0]).unwrap();
/// let scores = model.predict(&x).unwrap();
/// assert!(scores.get(0, 1) > scores.get(0, 0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSoftmax {
    /// `n_features × n_classes` weight matrix
    weights: Matrix<f32>,
    /// Per-class bias
    bias: Vector<f32>,
}

impl LinearSoftmax {
    /// Creates a classifier from explicit weights and bias.
    ///
    /// # Errors
    ///
    /// Returns an error if the bias length doesn't match the weight
    /// columns, or if there are fewer than two classes.
    pub fn new(weights: Matrix<f32>, bias: Vector<f32>) -> Result<Self> {
        if bias.len() != weights.n_cols() {
            return Err(AdversarioError::dimension_mismatch(
                format!("bias length {}", weights.n_cols()),
                bias.len(),
            ));
        }
        if weights.n_cols() < 2 {
            return Err(AdversarioError::invalid_hyperparameter(
                "n_classes",
                weights.n_cols(),
                ">= 2",
            ));
        }
        Ok(Self { weights, bias })
    }

    /// Number of input features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.weights.n_rows()
    }

    fn check_batch(&self, x: &Matrix<f32>) -> Result<()> {
        if x.n_cols() != self.n_features() {
            return Err(AdversarioError::dimension_mismatch(
                format!("n_features={}", self.n_features()),
                x.n_cols(),
            ));
        }
        Ok(())
    }

    /// Softmax class probabilities for one logit row, max-shifted for
    /// numerical stability.
    fn softmax_row(&self, logits: &[f32]) -> Vec<f32> {
        let max = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let exps: Vec<f32> = logits.iter().map(|&z| (z - max).exp()).collect();
        let total: f32 = exps.iter().sum();
        exps.iter().map(|&e| e / total).collect()
    }

    fn logits(&self, x: &Matrix<f32>) -> Matrix<f32> {
        let (n_samples, n_features) = x.shape();
        let n_classes = self.weights.n_cols();
        let mut logits = Matrix::zeros(n_samples, n_classes);
        for i in 0..n_samples {
            for c in 0..n_classes {
                let mut z = self.bias[c];
                for j in 0..n_features {
                    z += x.get(i, j) * self.weights.get(j, c);
                }
                logits.set(i, c, z);
            }
        }
        logits
    }
}

impl Classifier for LinearSoftmax {
    fn n_classes(&self) -> usize {
        self.weights.n_cols()
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_batch(x)?;
        let logits = self.logits(x);
        let mut scores = Matrix::zeros(x.n_rows(), self.n_classes());
        for i in 0..x.n_rows() {
            let probs = self.softmax_row(logits.row(i).as_slice());
            scores.set_row(i, &probs);
        }
        Ok(scores)
    }

    fn loss_gradient(&self, x: &Matrix<f32>, targets: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_batch(x)?;
        if targets.shape() != (x.n_rows(), self.n_classes()) {
            return Err(AdversarioError::dimension_mismatch(
                format!("targets {}x{}", x.n_rows(), self.n_classes()),
                format!("{}x{}", targets.n_rows(), targets.n_cols()),
            ));
        }

        // Cross-entropy over softmax: d loss / d logits = p - y, so the
        // input gradient is (p - y) Wᵀ.
        let scores = self.predict(x)?;
        let mut grad = Matrix::zeros(x.n_rows(), self.n_features());
        for i in 0..x.n_rows() {
            for j in 0..self.n_features() {
                let mut g = 0.0;
                for c in 0..self.n_classes() {
                    g += (scores.get(i, c) - targets.get(i, c)) * self.weights.get(j, c);
                }
                grad.set(i, j, g);
            }
        }
        Ok(grad)
    }
}
