//! Errors raised while constructing a chord data model.

use thiserror::Error;

/// Construction-time validation failures of [`ChordData`](super::ChordData)
/// and [`StrengthMatrix`](super::StrengthMatrix).
///
/// Every variant describes a dimension or partition inconsistency. Layout code
/// never re-checks these; a constructed model is valid by definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("label count {labels} does not match matrix dimension {matrix}")]
    DimensionMismatch { labels: usize, matrix: usize },

    #[error("matrix row {row} has {actual} values, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix of dimension {dim} needs {expected} values, got {actual}")]
    ValueCount {
        dim: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix value at ({row}, {column}) is not finite")]
    NonFinite { row: usize, column: usize },

    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    #[error("invalid group partition: {0}")]
    InvalidGroups(String),

    #[error("entity index {index} out of bounds for {len} entities")]
    IndexOutOfBounds { index: usize, len: usize },
}
