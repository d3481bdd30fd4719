//! Error types for Chordal operations.
//!
//! This module provides the main error type [`ChordalError`] which wraps
//! the error conditions that can occur while laying out a chord diagram.

use std::io;

use thiserror::Error;

use chordal_core::model::ModelError;

/// The main error type for Chordal operations.
///
/// All errors are detected synchronously. Layout is pure, so retrying with the
/// same inputs reproduces the same error.
#[derive(Debug, Error)]
pub enum ChordalError {
    /// A configuration value is unknown or out of range.
    #[error("Configuration error: `{field}` = {value}: {reason}")]
    Configuration {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The data cannot be laid out (e.g. there is no flow at all).
    #[error("Domain error: {0}")]
    Domain(String),

    /// The data model is internally inconsistent.
    #[error("Dimension error: {0}")]
    Dimension(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ChordalError {
    /// Create a new `Configuration` error for `field`.
    pub fn configuration(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_names_field_and_value() {
        let err = ChordalError::configuration("gap_fraction", 1.5, "must be in [0, 1)");
        assert_eq!(
            err.to_string(),
            "Configuration error: `gap_fraction` = 1.5: must be in [0, 1)"
        );
    }

    #[test]
    fn test_model_error_converts_to_dimension() {
        let err: ChordalError = ModelError::DuplicateLabel("a".into()).into();
        assert!(matches!(err, ChordalError::Dimension(_)));
        assert_eq!(err.to_string(), "Dimension error: duplicate label `a`");
    }
}
