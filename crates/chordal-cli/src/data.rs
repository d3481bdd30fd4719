//! Chord data file loading.
//!
//! A data file is TOML with the matrix first and either a flat `labels` list
//! or one `[[groups]]` table per group:
//!
//! ```toml
//! matrix = [
//!     [0.0, 2.0, 1.0],
//!     [2.0, 0.0, 3.0],
//!     [1.0, 3.0, 0.0],
//! ]
//!
//! [[groups]]
//! name = "north"
//! labels = ["a", "b"]
//!
//! [[groups]]
//! name = "south"
//! labels = ["c"]
//! ```

use std::{fs, io, path::Path};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use chordal::ChordalError;
use chordal_core::model::{ChordData, StrengthMatrix};

/// Data file errors for CLI
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to parse TOML data file: {0}")]
    Parse(String),

    #[error("Data file must list either `labels` or `groups`, not {0}")]
    Labels(&'static str),
}

impl From<DataError> for ChordalError {
    fn from(err: DataError) -> Self {
        ChordalError::Io(io::Error::other(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataFile {
    matrix: Vec<Vec<f64>>,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default)]
    groups: Option<Vec<GroupEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupEntry {
    name: String,
    labels: Vec<String>,
}

/// Parse chord data from TOML source.
///
/// # Errors
///
/// Returns `ChordalError` if the TOML is malformed, if neither or both of
/// `labels` and `groups` are given, or if the resulting model is inconsistent.
pub fn parse_data(source: &str) -> Result<ChordData, ChordalError> {
    let file: DataFile = toml::from_str(source).map_err(|e| DataError::Parse(e.to_string()))?;
    let matrix = StrengthMatrix::from_rows(file.matrix)?;

    let data = match (file.labels, file.groups) {
        (Some(labels), None) => ChordData::ungrouped(labels, matrix)?,
        (None, Some(groups)) => ChordData::from_groups(
            groups.into_iter().map(|group| (group.name, group.labels)),
            matrix,
        )?,
        (None, None) => return Err(DataError::Labels("neither").into()),
        (Some(_), Some(_)) => return Err(DataError::Labels("both").into()),
    };

    debug!(entities = data.len(), groups = data.groups().len(); "Chord data loaded");

    Ok(data)
}

/// Read and parse a chord data file.
///
/// # Errors
///
/// Returns `ChordalError::Io` if the file cannot be read, otherwise see
/// [`parse_data`].
pub fn load_data(path: impl AsRef<Path>) -> Result<ChordData, ChordalError> {
    let source = fs::read_to_string(path)?;
    parse_data(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_data() {
        let data = parse_data(
            r#"
matrix = [[0, 1, 2], [1, 0, 3], [2, 3, 0]]

[[groups]]
name = "north"
labels = ["a", "b"]

[[groups]]
name = "south"
labels = ["c"]
"#,
        )
        .unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data.groups().len(), 2);
        assert_eq!(data.groups()[1].name(), "south");
        assert_eq!(data.matrix().get(1, 2), 3.0);
    }

    #[test]
    fn test_flat_labels() {
        let data = parse_data("labels = [\"a\", \"b\"]\nmatrix = [[0.0, 1.5], [1.5, 0.0]]\n").unwrap();

        assert_eq!(data.labels(), &["a".to_string(), "b".to_string()]);
        assert_eq!(data.groups().len(), 1);
    }

    #[test]
    fn test_labels_or_groups_required() {
        let err = parse_data("matrix = [[0.0]]\n").unwrap_err();
        assert!(err.to_string().contains("not neither"));
    }

    #[test]
    fn test_mismatched_dimensions() {
        let err = parse_data("labels = [\"a\"]\nmatrix = [[0.0, 1.0], [1.0, 0.0]]\n").unwrap_err();
        assert!(matches!(err, ChordalError::Dimension(_)));
    }

    #[test]
    fn test_ragged_matrix() {
        let err = parse_data("labels = [\"a\", \"b\"]\nmatrix = [[0.0, 1.0], [1.0]]\n").unwrap_err();
        assert!(matches!(err, ChordalError::Dimension(_)));
    }
}
