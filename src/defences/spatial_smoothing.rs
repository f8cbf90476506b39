//! Local spatial smoothing defence.

use crate::error::{AdversarioError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Local spatial smoothing: a sliding-window median filter over each
/// sample's features.
///
/// Median filtering squashes the high-frequency, low-amplitude noise that
/// gradient attacks introduce while leaving the signal largely intact.
/// Window edges use reflect padding. Labels are never touched.
///
/// There is nothing to learn, so `fit` is a no-op and `transform` works on
/// a freshly constructed instance.
///
/// # Example
///
/// ```
/// use adversario::defences::SpatialSmoothing;
/// use adversario::prelude::*;
///
/// let x = Matrix::from_vec(1, 5, vec![0.0, 0.0, 9.0, 0.0, 0.0]).unwrap();
/// let smoothed = SpatialSmoothing::new(3).transform(&x).unwrap();
/// // The isolated spike is filtered out.
/// assert_eq!(smoothed.get(0, 2), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialSmoothing {
    /// Size of the sliding window
    window_size: usize,
}

impl SpatialSmoothing {
    /// Creates a smoothing defence with the given sliding-window size.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Returns the configured window size.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AdversarioError::invalid_hyperparameter(
                "window_size",
                self.window_size,
                "a positive integer",
            ));
        }
        Ok(())
    }

    /// Median of a window; for even windows, the lower middle of the
    /// sorted values.
    fn median(window: &mut [f32]) -> f32 {
        window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        window[window.len() / 2]
    }
}

/// Reflects an out-of-range index back into `[0, len)` about the edges.
fn reflect(idx: isize, len: usize) -> usize {
    let len = len as isize;
    let mut i = idx;
    // A window never spans more than a couple of reflections for valid
    // window sizes, but fold until stable to stay total.
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= len {
            i = 2 * len - i - 1;
        } else {
            return i as usize;
        }
    }
}

impl Transformer for SpatialSmoothing {
    fn fit(&mut self, _x: &Matrix<f32>) -> Result<()> {
        // No parameters to learn.
        self.validate()
    }

    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.validate()?;
        let (n_samples, n_features) = x.shape();
        if n_features == 0 {
            return Ok(x.clone());
        }

        let half = (self.window_size / 2) as isize;
        let mut smoothed = Matrix::zeros(n_samples, n_features);
        let mut window = vec![0.0; self.window_size];
        for i in 0..n_samples {
            for j in 0..n_features {
                for (w, offset) in (-half..).take(self.window_size).enumerate() {
                    let src = reflect(j as isize + offset, n_features);
                    window[w] = x.get(i, src);
                }
                smoothed.set(i, j, Self::median(&mut window));
            }
        }
        Ok(smoothed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_zero_rejected() {
        let defence = SpatialSmoothing::new(0);
        let x = Matrix::zeros(1, 4);
        let err = defence.transform(&x).unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn test_fit_validates_and_is_noop() {
        let mut defence = SpatialSmoothing::new(3);
        let x = Matrix::zeros(2, 4);
        assert!(defence.fit(&x).is_ok());
        let mut bad = SpatialSmoothing::new(0);
        assert!(bad.fit(&x).is_err());
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let defence = SpatialSmoothing::new(1);
        let x = Matrix::from_vec(2, 3, vec![1.0, -2.0, 3.0, 0.5, 0.0, -0.5]).unwrap();
        let smoothed = defence.transform(&x).unwrap();
        assert_eq!(smoothed, x);
    }

    #[test]
    fn test_spike_removed() {
        let defence = SpatialSmoothing::new(3);
        let x = Matrix::from_vec(1, 5, vec![1.0, 1.0, 10.0, 1.0, 1.0]).unwrap();
        let smoothed = defence.transform(&x).unwrap();
        assert_eq!(smoothed.row(0).as_slice(), &[1.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_constant_signal_unchanged() {
        let defence = SpatialSmoothing::new(5);
        let x = Matrix::from_vec(1, 6, vec![2.0; 6]).unwrap();
        let smoothed = defence.transform(&x).unwrap();
        assert_eq!(smoothed, x);
    }

    #[test]
    fn test_samples_smoothed_independently() {
        let defence = SpatialSmoothing::new(3);
        let x = Matrix::from_vec(2, 3, vec![0.0, 9.0, 0.0, 5.0, 5.0, 5.0]).unwrap();
        let smoothed = defence.transform(&x).unwrap();
        assert_eq!(smoothed.row(0).as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(smoothed.row(1).as_slice(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_reflect_padding_at_edges() {
        // Window 3 at j=0 sees [x[0], x[0], x[1]] under reflection.
        let defence = SpatialSmoothing::new(3);
        let x = Matrix::from_vec(1, 3, vec![4.0, 1.0, 1.0]).unwrap();
        let smoothed = defence.transform(&x).unwrap();
        assert_eq!(smoothed.get(0, 0), 4.0);
    }

    #[test]
    fn test_fit_transform() {
        let mut defence = SpatialSmoothing::new(3);
        let x = Matrix::from_vec(1, 4, vec![0.0, 8.0, 0.0, 0.0]).unwrap();
        let smoothed = defence.fit_transform(&x).unwrap();
        assert_eq!(smoothed.row(0).as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(0, 4), 0);
        assert_eq!(reflect(3, 4), 3);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
    }
}
