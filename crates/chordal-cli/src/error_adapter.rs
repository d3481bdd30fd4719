//! Error adapter for converting ChordalError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Chord data carries
//! no source spans, so every error renders as a single diagnostic with a code
//! and, where one applies, a help message.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use chordal::ChordalError;

/// Adapter for [`ChordalError`].
pub struct ErrorAdapter<'a>(pub &'a ChordalError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChordalError::Configuration { .. } => "chordal::configuration",
            ChordalError::Domain(_) => "chordal::domain",
            ChordalError::Dimension(_) => "chordal::dimension",
            ChordalError::Io(_) => "chordal::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ChordalError::Configuration { field, .. } => {
                format!("check `{field}` in the [layout] or [filter] section of the configuration")
            }
            ChordalError::Domain(_) => {
                "at least one entity needs a non-zero row in the matrix".to_string()
            }
            ChordalError::Dimension(_) => {
                "the matrix must be square with one row per label".to_string()
            }
            ChordalError::Io(_) => return None,
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use chordal_core::model::ModelError;

    use super::*;

    fn code(err: &ChordalError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    #[test]
    fn test_codes_follow_variant() {
        assert_eq!(
            code(&ChordalError::configuration("gap_fraction", 2.0, "too large")),
            "chordal::configuration"
        );
        assert_eq!(
            code(&ChordalError::Domain("no flow".to_string())),
            "chordal::domain"
        );
        assert_eq!(
            code(&ChordalError::Dimension(ModelError::DuplicateLabel("a".to_string()))),
            "chordal::dimension"
        );
    }

    #[test]
    fn test_configuration_help_names_field() {
        let err = ChordalError::configuration("sort_by", "size", "unknown policy");
        let adapter = ErrorAdapter(&err);

        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("`sort_by`"));
    }

    #[test]
    fn test_adapter_displays_wrapped_error() {
        let err = ChordalError::Domain("total flow is zero".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.to_string(), "Domain error: total flow is zero");
        assert!(adapter.labels().is_none());
        assert!(adapter.source_code().is_none());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = ChordalError::Io(std::io::Error::other("disk full"));
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "chordal::io");
        assert!(adapter.help().is_none());
    }
}
