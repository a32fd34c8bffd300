//! Error types for ant colony optimization.

use thiserror::Error;

/// Errors raised while validating inputs and parameters.
///
/// Validation happens once, before any iteration runs. Numeric
/// degeneracies inside path construction are never errors; they are
/// recovered locally so a run always yields a valid tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// The problem input is unusable (too few cities, malformed matrix, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An algorithm parameter is outside its declared domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl AcoError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`AcoError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, AcoError::InvalidParameter { .. })
    }

    /// Returns `true` for [`AcoError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AcoError::InvalidInput(_))
    }
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Checks that an evaporation factor lies in `[0, 1)`.
pub(crate) fn validate_decay(decay: f64) -> Result<()> {
    if !(0.0..1.0).contains(&decay) {
        return Err(AcoError::parameter(
            "decay",
            format!("must be in [0, 1), got {decay}"),
        ));
    }
    Ok(())
}

/// Checks that a weighting exponent is finite and non-negative.
pub(crate) fn validate_exponent(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AcoError::parameter(
            name,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_message() {
        let err = AcoError::parameter("decay", "must be in [0, 1), got 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `decay`: must be in [0, 1), got 1"
        );
        assert!(err.is_invalid_parameter());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_shared_validators() {
        assert!(validate_decay(0.0).is_ok());
        assert!(validate_decay(0.99).is_ok());
        assert!(validate_decay(1.0).unwrap_err().is_invalid_parameter());
        assert!(validate_decay(f64::NAN).is_err());
        assert!(validate_exponent("alpha", 0.0).is_ok());
        assert!(matches!(
            validate_exponent("beta", -1.0),
            Err(AcoError::InvalidParameter { name: "beta", .. })
        ));
        assert!(validate_exponent("alpha", f64::INFINITY).is_err());
    }

    #[test]
    fn test_input_message() {
        let err = AcoError::InvalidInput("need at least 2 cities, got 1".into());
        assert_eq!(err.to_string(), "invalid input: need at least 2 cities, got 1");
        assert!(err.is_invalid_input());
    }
}
