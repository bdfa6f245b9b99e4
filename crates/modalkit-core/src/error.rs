//! Configuration errors.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Detent order violated | `min > ideal` or `ideal > max` | `InvalidDetents` |
//! | Fraction out of range | fraction outside `[0, 1]` | `InvalidFraction` |
//! | Negative dimension | absolute size below zero | `NegativeDimension` |
//! | Unparseable document | malformed TOML/JSON | `Parse` |
//!
//! Code-constructed configuration treats these as programmer errors and
//! panics at construction; file-loaded configuration returns them.

use std::fmt;

/// Errors from validating surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Detents must satisfy `min <= ideal <= max`.
    InvalidDetents { min: f64, ideal: f64, max: f64 },
    /// A fractional value must lie in `[0, 1]`.
    InvalidFraction { field: &'static str, value: f64 },
    /// An absolute dimension must not be negative.
    NegativeDimension { field: &'static str, value: f64 },
    /// A configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDetents { min, ideal, max } => write!(
                f,
                "detents must satisfy min <= ideal <= max (got min={min}, ideal={ideal}, max={max})"
            ),
            Self::InvalidFraction { field, value } => {
                write!(f, "{field} must be a fraction in [0, 1] (got {value})")
            }
            Self::NegativeDimension { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Check that `value` is a usable fraction.
pub fn check_fraction(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidFraction { field, value })
    }
}

/// Check that `value` is a usable absolute dimension.
pub fn check_dimension(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeDimension { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_detents() {
        let err = ConfigError::InvalidDetents {
            min: 10.0,
            ideal: 5.0,
            max: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "detents must satisfy min <= ideal <= max (got min=10, ideal=5, max=20)"
        );
    }

    #[test]
    fn fraction_bounds_inclusive() {
        assert_eq!(check_fraction("ratio", 0.0), Ok(0.0));
        assert_eq!(check_fraction("ratio", 1.0), Ok(1.0));
        assert!(matches!(
            check_fraction("ratio", 1.5),
            Err(ConfigError::InvalidFraction { field: "ratio", .. })
        ));
        assert!(check_fraction("ratio", f64::NAN).is_err());
    }

    #[test]
    fn negative_dimension_rejected() {
        assert!(check_dimension("width", -1.0).is_err());
        assert_eq!(check_dimension("width", 0.0), Ok(0.0));
    }
}
