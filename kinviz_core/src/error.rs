// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

extern crate alloc;

use alloc::string::String;

/// Errors raised while validating chart input or configuration.
///
/// These are fail-fast: nothing in `kinviz` retries or recovers from them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The series has more segments than there are configured color pairs.
    #[error("maximum segments exceeded: {segments} segments but only {colors} color pairs")]
    TooManySegments {
        /// Number of segments in the input series.
        segments: usize,
        /// Number of configured color pairs.
        colors: usize,
    },
    /// The normalization policy name is not recognized.
    #[error("unknown normalization policy `{0}`")]
    UnknownPolicy(String),
    /// A color string could not be parsed.
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    /// A size, radius or ratio is out of its valid range.
    #[error("invalid {field}: {value}")]
    InvalidDimension {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl ConfigError {
    /// Checks that `value` is finite and non-negative.
    pub fn check_non_negative(field: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::InvalidDimension { field, value })
        }
    }

    /// Checks that `value` lies in `[0, 1]`.
    pub fn check_unit(field: &'static str, value: f64) -> Result<(), Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::InvalidDimension { field, value })
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = ConfigError::TooManySegments {
            segments: 6,
            colors: 5,
        };
        assert_eq!(
            err.to_string(),
            "maximum segments exceeded: 6 segments but only 5 color pairs"
        );
        assert_eq!(
            ConfigError::UnknownPolicy("median".into()).to_string(),
            "unknown normalization policy `median`"
        );
    }

    #[test]
    fn dimension_checks() {
        assert!(ConfigError::check_non_negative("width", 0.0).is_ok());
        assert!(ConfigError::check_non_negative("width", -1.0).is_err());
        assert!(ConfigError::check_non_negative("width", f64::NAN).is_err());
        assert!(ConfigError::check_unit("horizon", 1.0).is_ok());
        assert_eq!(
            ConfigError::check_unit("horizon", 1.5),
            Err(ConfigError::InvalidDimension {
                field: "horizon",
                value: 1.5
            })
        );
    }
}
