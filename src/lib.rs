//! Adversario: adversarial example generation for Rust classifiers.
//!
//! Adversario crafts inputs that are minimally perturbed — bounded by an
//! L∞, L1 or L2 norm-ball — yet misclassified, against any model that can
//! expose per-class scores and an input loss gradient.
//!
//! # Quick Start
//!
//! ```
//! use adversario::attacks::BasicIterative;
//! use adversario::classification::LinearSoftmax;
//! use adversario::prelude::*;
//!
//! // A linear model over two features.
//! let weights = Matrix::from_vec(2, 2, vec![2.0, -2.0, -1.0, 1.0]).unwrap();
//! let bias = Vector::from_slice(&[0.0, 0.0]);
//! let model = LinearSoftmax::new(weights, bias).unwrap();
//!
//! // Craft adversarial versions of a batch, perturbing at most 0.3 per
//! // component, in steps of 0.1, for up to 10 iterations.
//! let x = Matrix::from_vec(2, 2, vec![0.5, 0.0, -0.5, 0.2]).unwrap();
//! let mut attack = BasicIterative::new(&model)
//!     .with_eps(0.3)
//!     .with_eps_step(0.1)
//!     .with_max_iter(10);
//! let adv = attack.generate(&x, None).unwrap();
//!
//! // The perturbation of every sample stays inside the budget.
//! let noise = adv.sub(&x).unwrap();
//! for i in 0..2 {
//!     assert!(noise.row(i).norm_linf() <= 0.3 + 1e-6);
//! }
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`traits`]: Classifier, perturber, attack and transformer contracts
//! - [`attacks`]: Single-step and iterative gradient attacks
//! - [`projection`]: Norm-ball projection of perturbation tensors
//! - [`defences`]: Preprocessing defences (spatial smoothing)
//! - [`classification`]: Reference linear softmax classifier
//! - [`utils`]: One-hot encoding and arg-max label helpers
//! - [`error`]: Error types

pub mod attacks;
pub mod classification;
pub mod defences;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod projection;
pub mod traits;
pub mod utils;
