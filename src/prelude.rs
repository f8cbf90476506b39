//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use adversario::prelude::*;
//! ```

pub use crate::attacks::{BasicIterative, FastGradient, Overrides};
pub use crate::error::{AdversarioError, Result};
pub use crate::primitives::{Matrix, Vector};
pub use crate::projection::{project, NormOrder};
pub use crate::traits::{Attack, Classifier, SingleStepPerturber, Transformer};
pub use crate::utils::{argmax_rows, labels_from_scores, one_hot};
