//! Fast gradient single-step attack.

use super::resolve_targets;
use crate::error::{AdversarioError, Result};
use crate::primitives::Matrix;
use crate::projection::{project, NormOrder};
use crate::traits::{Attack, Classifier, SingleStepPerturber};
use rand::Rng;
use rand::SeedableRng;

/// Fast gradient method: a single bounded perturbation step along the
/// classifier's loss gradient.
///
/// Untargeted runs ascend the loss away from the fixed labels; targeted
/// runs descend it toward them. On its own it is a complete one-shot
/// attack; composed into [`super::BasicIterative`] it supplies the
/// per-iteration step.
///
/// # Example
///
/// ```
/// use adversario::attacks::FastGradient;
/// use adversario::classification::LinearSoftmax;
/// use adversario::prelude::*;
///
/// let weights = Matrix::from_vec(2, 2, vec![1.0, -1.0, 0.5, -0.5]).unwrap();
/// let bias = Vector::from_slice(&[0.0, 0.0]);
/// let model = LinearSoftmax::new(weights, bias).unwrap();
///
/// let x = Matrix::from_vec(1, 2, vec![0.2, 0.1]).unwrap();
/// let mut attack = FastGradient::new(&model).with_eps(0.25);
/// let adv = attack.generate(&x, None).unwrap();
/// assert!((adv.get(0, 0) - x.get(0, 0)).abs() <= 0.25 + 1e-6);
/// ```
pub struct FastGradient<'a> {
    classifier: &'a dyn Classifier,
    norm: NormOrder,
    eps: f32,
    targeted: bool,
    random_init: bool,
    random_state: Option<u64>,
}

impl<'a> FastGradient<'a> {
    /// Creates a fast gradient attack with default parameters
    /// (L∞ norm, eps 0.3, untargeted, no random start).
    #[must_use]
    pub fn new(classifier: &'a dyn Classifier) -> Self {
        Self {
            classifier,
            norm: NormOrder::LInf,
            eps: 0.3,
            targeted: false,
            random_init: false,
            random_state: None,
        }
    }

    /// Sets the norm order bounding the perturbation.
    #[must_use]
    pub fn with_norm(mut self, norm: NormOrder) -> Self {
        self.norm = norm;
        self
    }

    /// Sets the maximum perturbation magnitude.
    #[must_use]
    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    /// Switches between targeted and untargeted objectives.
    #[must_use]
    pub fn with_targeted(mut self, targeted: bool) -> Self {
        self.targeted = targeted;
        self
    }

    /// Starts from a random point near the input instead of the input
    /// itself.
    #[must_use]
    pub fn with_random_init(mut self, random_init: bool) -> Self {
        self.random_init = random_init;
        self
    }

    /// Seeds the random start for reproducible runs.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Returns the configured perturbation budget.
    #[must_use]
    pub fn eps(&self) -> f32 {
        self.eps
    }

    fn validate(&self) -> Result<()> {
        if self.eps <= 0.0 {
            return Err(AdversarioError::invalid_hyperparameter(
                "eps", self.eps, "> 0",
            ));
        }
        Ok(())
    }

    /// Adds per-component uniform noise in `[-magnitude, magnitude]`.
    fn random_start(&self, x: &Matrix<f32>, magnitude: f32) -> Matrix<f32> {
        let mut started = x.clone();
        match self.random_state {
            Some(seed) => {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                for v in started.as_mut_slice() {
                    *v += rng.gen_range(-magnitude..=magnitude);
                }
            }
            None => {
                let mut rng = rand::thread_rng();
                for v in started.as_mut_slice() {
                    *v += rng.gen_range(-magnitude..=magnitude);
                }
            }
        }
        started
    }

    /// One perturbation step of magnitude `step_size`.
    ///
    /// The step direction per sample is `sign(g)` under L∞ and the
    /// p-normalized gradient under L1/L2; samples with zero gradient stay
    /// put. Targeted runs take the step against the gradient.
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatches or classifier failure.
    pub fn step(
        &self,
        x: &Matrix<f32>,
        targets: &Matrix<f32>,
        step_size: f32,
        random_init: bool,
    ) -> Result<Matrix<f32>> {
        let start = if random_init {
            self.random_start(x, step_size)
        } else {
            x.clone()
        };

        let grad = self.classifier.loss_gradient(&start, targets)?;
        if grad.shape() != x.shape() {
            return Err(AdversarioError::dimension_mismatch(
                format!("gradient shape {:?}", x.shape()),
                format!("{:?}", grad.shape()),
            ));
        }

        let signed_step = if self.targeted { -step_size } else { step_size };
        let mut perturbed = start;
        for i in 0..x.n_rows() {
            let g = grad.row(i);
            let mut row = perturbed.row(i);
            match self.norm {
                NormOrder::LInf => {
                    for j in 0..row.len() {
                        row[j] += signed_step * sign(g[j]);
                    }
                }
                NormOrder::L1 | NormOrder::L2 => {
                    let magnitude = if self.norm == NormOrder::L1 {
                        g.norm_l1()
                    } else {
                        g.norm_l2()
                    };
                    if magnitude > 0.0 {
                        for j in 0..row.len() {
                            row[j] += signed_step * g[j] / magnitude;
                        }
                    }
                }
            }
            perturbed.set_row(i, row.as_slice());
        }
        Ok(perturbed)
    }
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl SingleStepPerturber for FastGradient<'_> {
    fn perturb(
        &self,
        x: &Matrix<f32>,
        targets: &Matrix<f32>,
        step_size: f32,
        random_init: bool,
    ) -> Result<Matrix<f32>> {
        self.step(x, targets, step_size, random_init)
    }
}

impl Attack for FastGradient<'_> {
    fn generate(&mut self, x: &Matrix<f32>, y: Option<&Matrix<f32>>) -> Result<Matrix<f32>> {
        self.validate()?;
        let targets = resolve_targets(self.classifier, x, y, self.targeted)?;
        let stepped = self.step(x, &targets, self.eps, self.random_init)?;
        let noise = project(&stepped.sub(x)?, self.eps, self.norm);
        Ok(x.add(&noise)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::one_hot;

    // Gradient is +1 on every component; scores always favor class 0.
    struct OnesGradient;

    impl Classifier for OnesGradient {
        fn n_classes(&self) -> usize {
            2
        }

        fn predict(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
            let mut scores = Matrix::zeros(x.n_rows(), 2);
            for i in 0..x.n_rows() {
                scores.set(i, 0, 1.0);
            }
            Ok(scores)
        }

        fn loss_gradient(&self, x: &Matrix<f32>, _targets: &Matrix<f32>) -> Result<Matrix<f32>> {
            let mut grad = Matrix::zeros(x.n_rows(), x.n_cols());
            for v in grad.as_mut_slice() {
                *v = 1.0;
            }
            Ok(grad)
        }
    }

    struct ZeroGradient;

    impl Classifier for ZeroGradient {
        fn n_classes(&self) -> usize {
            2
        }

        fn predict(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
            Ok(Matrix::zeros(x.n_rows(), 2))
        }

        fn loss_gradient(&self, x: &Matrix<f32>, _targets: &Matrix<f32>) -> Result<Matrix<f32>> {
            Ok(Matrix::zeros(x.n_rows(), x.n_cols()))
        }
    }

    #[test]
    fn test_linf_step_moves_by_sign() {
        let clf = OnesGradient;
        let attack = FastGradient::new(&clf);
        let x = Matrix::from_vec(1, 3, vec![0.0, 0.5, -0.5]).unwrap();
        let y = one_hot(&[0], 2).unwrap();
        let stepped = attack.step(&x, &y, 0.1, false).unwrap();
        assert_eq!(stepped.row(0).as_slice(), &[0.1, 0.6, -0.4]);
    }

    #[test]
    fn test_targeted_step_reverses_direction() {
        let clf = OnesGradient;
        let attack = FastGradient::new(&clf).with_targeted(true);
        let x = Matrix::from_vec(1, 2, vec![0.0, 0.0]).unwrap();
        let y = one_hot(&[1], 2).unwrap();
        let stepped = attack.step(&x, &y, 0.1, false).unwrap();
        assert_eq!(stepped.row(0).as_slice(), &[-0.1, -0.1]);
    }

    #[test]
    fn test_l2_step_normalizes_gradient() {
        let clf = OnesGradient;
        let attack = FastGradient::new(&clf).with_norm(NormOrder::L2);
        let x = Matrix::from_vec(1, 4, vec![0.0; 4]).unwrap();
        let y = one_hot(&[0], 2).unwrap();
        let stepped = attack.step(&x, &y, 0.2, false).unwrap();
        // Gradient of all ones has L2 norm 2; each component moves 0.2/2.
        for j in 0..4 {
            assert!((stepped.get(0, j) - 0.1).abs() < 1e-6);
        }
        let moved = stepped.sub(&x).unwrap();
        assert!((moved.row(0).norm_l2() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_zero_gradient_leaves_sample_unchanged() {
        let clf = ZeroGradient;
        let attack = FastGradient::new(&clf).with_norm(NormOrder::L2);
        let x = Matrix::from_vec(1, 2, vec![0.3, 0.4]).unwrap();
        let y = one_hot(&[0], 2).unwrap();
        let stepped = attack.step(&x, &y, 0.1, false).unwrap();
        assert_eq!(stepped, x);
    }

    #[test]
    fn test_generate_validates_eps() {
        let clf = OnesGradient;
        let mut attack = FastGradient::new(&clf).with_eps(0.0);
        let x = Matrix::zeros(1, 2);
        let err = attack.generate(&x, None).unwrap_err();
        assert!(err.to_string().contains("eps"));
    }

    #[test]
    fn test_generate_stays_in_ball() {
        let clf = OnesGradient;
        let mut attack = FastGradient::new(&clf).with_eps(0.25);
        let x = Matrix::from_vec(2, 3, vec![0.0; 6]).unwrap();
        let adv = attack.generate(&x, None).unwrap();
        for i in 0..2 {
            let noise = adv.sub(&x).unwrap();
            assert!(noise.row(i).norm_linf() <= 0.25 + 1e-6);
        }
    }

    #[test]
    fn test_targeted_generate_requires_labels() {
        let clf = OnesGradient;
        let mut attack = FastGradient::new(&clf).with_targeted(true);
        let x = Matrix::zeros(1, 2);
        assert!(attack.generate(&x, None).is_err());
    }

    #[test]
    fn test_random_state_reproducible() {
        let clf = OnesGradient;
        let attack = FastGradient::new(&clf).with_random_state(42);
        let x = Matrix::from_vec(1, 4, vec![0.0; 4]).unwrap();
        let y = one_hot(&[0], 2).unwrap();
        let a = attack.step(&x, &y, 0.1, true).unwrap();
        let b = attack.step(&x, &y, 0.1, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_init_stays_near_input() {
        let clf = ZeroGradient;
        let attack = FastGradient::new(&clf).with_random_state(7);
        let x = Matrix::from_vec(1, 8, vec![0.0; 8]).unwrap();
        let y = one_hot(&[0], 2).unwrap();
        let stepped = attack.step(&x, &y, 0.1, true).unwrap();
        // Zero gradient: only the random start moved the sample, and each
        // component stays within the step magnitude.
        assert!(stepped.row(0).norm_linf() <= 0.1 + 1e-6);
        assert!(stepped.row(0).norm_linf() > 0.0);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
    }
}
