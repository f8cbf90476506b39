//! Error types for Adversario operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Adversario operations.
///
/// Covers invalid attack hyperparameters, shape mismatches between batches,
/// labels and score matrices, and failures surfaced by classifier
/// implementations.
///
/// # Examples
///
/// ```
/// use adversario::error::AdversarioError;
///
/// let err = AdversarioError::InvalidHyperparameter {
///     param: "eps_step".to_string(),
///     value: "0.5".to_string(),
///     constraint: "<= eps (0.3)".to_string(),
/// };
/// assert!(err.to_string().contains("eps_step"));
/// ```
#[derive(Debug)]
pub enum AdversarioError {
    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Matrix/batch dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Generic error with string message.
    ///
    /// Classifier and perturber implementations outside this crate surface
    /// their failures through this variant.
    Other(String),
}

impl fmt::Display for AdversarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdversarioError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            AdversarioError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            AdversarioError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AdversarioError {}

impl From<&str> for AdversarioError {
    fn from(msg: &str) -> Self {
        AdversarioError::Other(msg.to_string())
    }
}

impl From<String> for AdversarioError {
    fn from(msg: String) -> Self {
        AdversarioError::Other(msg)
    }
}

impl AdversarioError {
    /// Create an invalid-hyperparameter error with descriptive context.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for AdversarioError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<AdversarioError> for &str {
    fn eq(&self, other: &AdversarioError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, AdversarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = AdversarioError::InvalidHyperparameter {
            param: "max_iter".to_string(),
            value: "0".to_string(),
            constraint: "a positive integer".to_string(),
        };
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("max_iter"));
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = AdversarioError::DimensionMismatch {
            expected: "4x10".to_string(),
            actual: "4x3".to_string(),
        };
        assert!(err.to_string().contains("Dimension mismatch"));
        assert!(err.to_string().contains("4x10"));
        assert!(err.to_string().contains("4x3"));
    }

    #[test]
    fn test_from_str() {
        let err: AdversarioError = "classifier exploded".into();
        assert!(matches!(err, AdversarioError::Other(_)));
        assert_eq!(err.to_string(), "classifier exploded");
    }

    #[test]
    fn test_from_string() {
        let err: AdversarioError = "classifier exploded".to_string().into();
        assert!(matches!(err, AdversarioError::Other(_)));
    }

    #[test]
    fn test_invalid_hyperparameter_helper() {
        let err = AdversarioError::invalid_hyperparameter("eps", -1.0, "> 0");
        let msg = err.to_string();
        assert!(msg.contains("eps"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("> 0"));
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = AdversarioError::dimension_mismatch("n_samples=4", 2);
        let msg = err.to_string();
        assert!(msg.contains("n_samples=4"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_error_eq_str() {
        let err = AdversarioError::Other("boom".to_string());
        assert!(err == "boom");
        assert!("boom" == err);
    }

    #[test]
    fn test_error_debug_impl() {
        let err = AdversarioError::Other("x".to_string());
        assert!(format!("{err:?}").contains("Other"));
    }
}
