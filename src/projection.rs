//! Norm-ball projection for perturbation tensors.
//!
//! Clamps accumulated per-sample noise back into the allowed norm-ball so
//! the total perturbation never exceeds the attack budget.

use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order of the norm bounding the perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormOrder {
    /// L∞: largest absolute component.
    LInf,
    /// L1: sum of absolute components.
    L1,
    /// L2: Euclidean norm.
    L2,
}

impl fmt::Display for NormOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormOrder::LInf => write!(f, "inf"),
            NormOrder::L1 => write!(f, "1"),
            NormOrder::L2 => write!(f, "2"),
        }
    }
}

/// Projects each row of `noise` into the `eps`-ball of the given norm.
///
/// Rows already inside the ball are returned unchanged:
/// - `LInf`: each component clamped to `[-eps, eps]`;
/// - `L1` / `L2`: the row is rescaled by `min(1, eps / ‖row‖)`.
///
/// # Examples
///
/// ```
/// use adversario::primitives::Matrix;
/// use adversario::projection::{project, NormOrder};
///
/// let noise = Matrix::from_vec(1, 2, vec![0.5, -0.1]).unwrap();
/// let clipped = project(&noise, 0.3, NormOrder::LInf);
/// assert_eq!(clipped.row(0).as_slice(), &[0.3, -0.1]);
/// ```
#[must_use]
pub fn project(noise: &Matrix<f32>, eps: f32, norm: NormOrder) -> Matrix<f32> {
    let mut clipped = noise.clone();
    for i in 0..noise.n_rows() {
        let row = noise.row(i);
        match norm {
            NormOrder::LInf => {
                let mut out = Vec::with_capacity(row.len());
                for j in 0..row.len() {
                    out.push(row[j].clamp(-eps, eps));
                }
                clipped.set_row(i, &out);
            }
            NormOrder::L1 | NormOrder::L2 => {
                let magnitude = if norm == NormOrder::L1 {
                    row.norm_l1()
                } else {
                    row.norm_l2()
                };
                if magnitude > eps {
                    let rescaled = row.scale(eps / magnitude);
                    clipped.set_row(i, rescaled.as_slice());
                }
            }
        }
    }
    clipped
}
