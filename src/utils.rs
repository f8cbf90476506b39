//! Label encoding utilities.
//!
//! One-hot encoding and score arg-max helpers shared by the attacks.

use crate::error::{AdversarioError, Result};
use crate::primitives::Matrix;

/// One-hot encodes class indices into an `n_samples × n_classes` matrix.
///
/// # Errors
///
/// Returns an error if any class index is out of range.
///
/// # Examples
///
/// ```
/// use adversario::utils::one_hot;
///
/// let labels = one_hot(&[2, 0], 3).unwrap();
/// assert_eq!(labels.row(0).as_slice(), &[0.0, 0.0, 1.0]);
/// assert_eq!(labels.row(1).as_slice(), &[1.0, 0.0, 0.0]);
/// ```
pub fn one_hot(classes: &[usize], n_classes: usize) -> Result<Matrix<f32>> {
    let mut encoded = Matrix::zeros(classes.len(), n_classes);
    for (i, &class) in classes.iter().enumerate() {
        if class >= n_classes {
            return Err(AdversarioError::invalid_hyperparameter(
                "class",
                class,
                &format!("< n_classes ({n_classes})"),
            ));
        }
        encoded.set(i, class, 1.0);
    }
    Ok(encoded)
}

/// Returns the arg-max class index of each row of a score matrix.
///
/// Ties resolve to the first maximal column.
#[must_use]
pub fn argmax_rows(scores: &Matrix<f32>) -> Vec<usize> {
    (0..scores.n_rows())
        .map(|i| {
            let mut best = 0;
            let mut best_score = scores.get(i, 0);
            for j in 1..scores.n_cols() {
                let s = scores.get(i, j);
                if s > best_score {
                    best = j;
                    best_score = s;
                }
            }
            best
        })
        .collect()
}

/// Converts a score matrix into one-hot labels of its per-row arg-max.
///
/// # Errors
///
/// Returns an error if `scores` has no columns.
pub fn labels_from_scores(scores: &Matrix<f32>) -> Result<Matrix<f32>> {
    if scores.n_cols() == 0 {
        return Err(AdversarioError::dimension_mismatch(
            "at least one class column",
            "0",
        ));
    }
    one_hot(&argmax_rows(scores), scores.n_cols())
}
