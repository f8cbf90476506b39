//! Basic iterative attack driver.

use super::{resolve_targets, FastGradient};
use crate::error::{AdversarioError, Result};
use crate::primitives::Matrix;
use crate::projection::{project, NormOrder};
use crate::traits::{Attack, Classifier, SingleStepPerturber};
use crate::utils::argmax_rows;

/// Iterative refinement of a single-step attack.
///
/// Repeats a bounded perturbation step, projecting the accumulated noise
/// back into the eps-ball around the original input after every step, and
/// retires each sample from the active set as soon as its objective is met.
/// Retired samples are frozen at their removal-time values; the rest keep
/// refining until the active set empties or `max_iter` is exhausted.
///
/// The accumulated perturbation is always measured against the ORIGINAL
/// input, never the previous iterate, so the total modification cannot
/// drift past the budget.
///
/// # Example
///
/// ```
/// use adversario::attacks::BasicIterative;
/// use adversario::classification::LinearSoftmax;
/// use adversario::prelude::*;
///
/// let weights = Matrix::from_vec(2, 2, vec![3.0, -3.0, 1.0, -1.0]).unwrap();
/// let bias = Vector::from_slice(&[0.0, 0.0]);
/// let model = LinearSoftmax::new(weights, bias).unwrap();
///
/// let x = Matrix::from_vec(1, 2, vec![0.05, 0.0]).unwrap();
/// let mut attack = BasicIterative::new(&model)
///     .with_eps(0.3)
///     .with_eps_step(0.1)
///     .with_max_iter(20);
/// let adv = attack.generate(&x, None).unwrap();
///
/// let noise = adv.sub(&x).unwrap();
/// assert!(noise.row(0).norm_linf() <= 0.3 + 1e-6);
/// ```
pub struct BasicIterative<'a> {
    classifier: &'a dyn Classifier,
    perturber: Box<dyn SingleStepPerturber + 'a>,
    norm: NormOrder,
    eps: f32,
    eps_step: f32,
    max_iter: usize,
    targeted: bool,
    random_init: bool,
}

/// Caller-supplied configuration overrides, applied and re-validated at the
/// start of every [`BasicIterative::generate_with`] call.
///
/// `max_iter` is a float on this surface: non-positive values are rejected,
/// fractional values truncate to their integer part.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// Norm order of the perturbation ball.
    pub norm: Option<NormOrder>,
    /// Total perturbation budget.
    pub eps: Option<f32>,
    /// Per-iteration step size.
    pub eps_step: Option<f32>,
    /// Maximum iteration count; truncated, not rejected, when fractional.
    pub max_iter: Option<f64>,
    /// Targeted/untargeted objective.
    pub targeted: Option<bool>,
    /// Random start on the first iteration.
    pub random_init: Option<bool>,
}

impl<'a> BasicIterative<'a> {
    /// Creates an iterative attack with default parameters
    /// (L∞ norm, eps 0.3, eps_step 0.1, 20 iterations, untargeted, no
    /// random start) and a [`FastGradient`] perturber over the same
    /// classifier.
    #[must_use]
    pub fn new(classifier: &'a dyn Classifier) -> Self {
        Self {
            classifier,
            perturber: Box::new(FastGradient::new(classifier)),
            norm: NormOrder::LInf,
            eps: 0.3,
            eps_step: 0.1,
            max_iter: 20,
            targeted: false,
            random_init: false,
        }
    }

    /// Replaces the single-step perturbation primitive.
    #[must_use]
    pub fn with_perturber(mut self, perturber: Box<dyn SingleStepPerturber + 'a>) -> Self {
        self.perturber = perturber;
        self
    }

    /// Sets the norm order bounding the total perturbation.
    #[must_use]
    pub fn with_norm(mut self, norm: NormOrder) -> Self {
        self.norm = norm;
        self
    }

    /// Sets the total perturbation budget.
    #[must_use]
    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the per-iteration step size.
    #[must_use]
    pub fn with_eps_step(mut self, eps_step: f32) -> Self {
        self.eps_step = eps_step;
        self
    }

    /// Sets the maximum iteration count.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Switches between targeted and untargeted objectives.
    #[must_use]
    pub fn with_targeted(mut self, targeted: bool) -> Self {
        self.targeted = targeted;
        self
    }

    /// Starts the first iteration from a random point near the input.
    #[must_use]
    pub fn with_random_init(mut self, random_init: bool) -> Self {
        self.random_init = random_init;
        self
    }

    /// Returns the configured perturbation budget.
    #[must_use]
    pub fn eps(&self) -> f32 {
        self.eps
    }

    /// Returns the configured step size.
    #[must_use]
    pub fn eps_step(&self) -> f32 {
        self.eps_step
    }

    /// Returns the configured iteration bound.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Checks the configuration invariants.
    ///
    /// Runs at the start of every generate call, so a previously-valid
    /// instance becomes invalid the moment a bad reconfiguration lands.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` when `eps <= 0`, `eps_step > eps`
    /// or `max_iter == 0`. `eps_step == eps` is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.eps <= 0.0 {
            return Err(AdversarioError::invalid_hyperparameter(
                "eps", self.eps, "> 0",
            ));
        }
        if self.eps_step > self.eps {
            return Err(AdversarioError::invalid_hyperparameter(
                "eps_step",
                self.eps_step,
                &format!("<= eps ({})", self.eps),
            ));
        }
        if self.max_iter == 0 {
            return Err(AdversarioError::invalid_hyperparameter(
                "max_iter",
                self.max_iter,
                "a positive integer",
            ));
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(norm) = overrides.norm {
            self.norm = norm;
        }
        if let Some(eps) = overrides.eps {
            self.eps = eps;
        }
        if let Some(eps_step) = overrides.eps_step {
            self.eps_step = eps_step;
        }
        if let Some(max_iter) = overrides.max_iter {
            let truncated = max_iter as usize;
            if max_iter <= 0.0 || truncated == 0 {
                return Err(AdversarioError::invalid_hyperparameter(
                    "max_iter",
                    max_iter,
                    "a positive integer",
                ));
            }
            self.max_iter = truncated;
        }
        if let Some(targeted) = overrides.targeted {
            self.targeted = targeted;
        }
        if let Some(random_init) = overrides.random_init {
            self.random_init = random_init;
        }
        Ok(())
    }

    /// Generates adversarial samples after applying configuration
    /// overrides.
    ///
    /// Overrides are applied first and the full configuration re-validated,
    /// so an invalid combination surfaces here before any computation.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, missing targeted labels,
    /// label shape mismatches, or any classifier/perturber failure (which
    /// aborts the call with no partial results).
    pub fn generate_with(
        &mut self,
        x: &Matrix<f32>,
        y: Option<&Matrix<f32>>,
        overrides: &Overrides,
    ) -> Result<Matrix<f32>> {
        self.apply_overrides(overrides)?;
        self.validate()?;

        let targets = resolve_targets(self.classifier, x, y, self.targeted)?;
        let target_classes = argmax_rows(&targets);

        let n_samples = x.n_rows();
        let mut adv = x.clone();
        let mut active = vec![true; n_samples];

        for iteration in 0..self.max_iter {
            let active_rows: Vec<usize> =
                (0..n_samples).filter(|&i| active[i]).collect();

            let sub_adv = gather(&adv, &active_rows);
            let sub_orig = gather(x, &active_rows);
            let sub_targets = gather(&targets, &active_rows);

            // Random start only on the first pass; later iterations refine
            // deterministically.
            let random_init = self.random_init && iteration == 0;
            let stepped =
                self.perturber
                    .perturb(&sub_adv, &sub_targets, self.eps_step, random_init)?;
            if stepped.shape() != sub_adv.shape() {
                return Err(AdversarioError::dimension_mismatch(
                    format!("perturbed batch {:?}", sub_adv.shape()),
                    format!("{:?}", stepped.shape()),
                ));
            }

            // Accumulated noise is measured against the original samples and
            // clipped there, then the perturbed values are re-derived from the
            // originals. Never accumulate relative to the previous iterate.
            let noise = project(&stepped.sub(&sub_orig)?, self.eps, self.norm);
            let reanchored = sub_orig.add(&noise)?;
            for (pos, &row) in active_rows.iter().enumerate() {
                adv.set_row(row, reanchored.row(pos).as_slice());
            }

            let scores = self.classifier.predict(&reanchored)?;
            let predictions = argmax_rows(&scores);

            for (pos, &row) in active_rows.iter().enumerate() {
                let reached = predictions[pos] == target_classes[row];
                let success = if self.targeted { reached } else { !reached };
                if success {
                    active[row] = false;
                }
            }

            if !active.iter().any(|&a| a) {
                break;
            }
        }

        Ok(adv)
    }
}

/// Copies the selected rows into a new matrix, preserving order.
fn gather(m: &Matrix<f32>, rows: &[usize]) -> Matrix<f32> {
    let mut out = Matrix::zeros(rows.len(), m.n_cols());
    for (pos, &row) in rows.iter().enumerate() {
        out.set_row(pos, m.row(row).as_slice());
    }
    out
}

impl Attack for BasicIterative<'_> {
    fn generate(&mut self, x: &Matrix<f32>, y: Option<&Matrix<f32>>) -> Result<Matrix<f32>> {
        self.generate_with(x, y, &Overrides::default())
    }
}
