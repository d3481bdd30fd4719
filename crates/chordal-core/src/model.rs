//! The chord data model: labeled entities, their groups, and the strength matrix.
//!
//! A [`ChordData`] value is validated once at construction. It guarantees:
//! - the matrix dimension equals the number of labels
//! - labels are unique
//! - groups are non-empty, contiguous, disjoint, and together cover every index
//!
//! Layout code relies on these invariants and never re-checks them.

mod error;
mod matrix;

pub use error::ModelError;
pub use matrix::StrengthMatrix;

use std::{collections::HashSet, ops::Range};

use log::trace;

/// A named, contiguous block of entity indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    range: Range<usize>,
}

impl Group {
    /// Creates a group covering `range`.
    pub fn new(name: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// The group's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity indices belonging to this group.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Number of entities in the group.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns `true` if the group has no entities.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns `true` if `index` belongs to this group.
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}

/// Labeled entities partitioned into groups, with their pairwise strengths.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordData {
    labels: Vec<String>,
    groups: Vec<Group>,
    matrix: StrengthMatrix,
}

impl ChordData {
    /// Creates a validated data model.
    ///
    /// # Errors
    ///
    /// - [`ModelError::DimensionMismatch`] if the label count differs from the
    ///   matrix dimension.
    /// - [`ModelError::DuplicateLabel`] if a label appears twice.
    /// - [`ModelError::InvalidGroups`] if the groups do not partition
    ///   `0..labels.len()` into contiguous, non-empty, ordered blocks with
    ///   distinct names.
    pub fn new(
        labels: Vec<String>,
        groups: Vec<Group>,
        matrix: StrengthMatrix,
    ) -> Result<Self, ModelError> {
        if labels.len() != matrix.dim() {
            return Err(ModelError::DimensionMismatch {
                labels: labels.len(),
                matrix: matrix.dim(),
            });
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ModelError::DuplicateLabel(label.clone()));
            }
        }

        validate_groups(&groups, labels.len())?;

        trace!(entities = labels.len(), groups = groups.len(); "Chord data validated");

        Ok(Self {
            labels,
            groups,
            matrix,
        })
    }

    /// Creates a model whose entities all belong to a single group.
    ///
    /// # Errors
    ///
    /// See [`ChordData::new`].
    pub fn ungrouped(
        labels: Vec<String>,
        matrix: StrengthMatrix,
    ) -> Result<Self, ModelError> {
        let groups = if labels.is_empty() {
            Vec::new()
        } else {
            vec![Group::new("", 0..labels.len())]
        };
        Self::new(labels, groups, matrix)
    }

    /// Creates a model from `(group name, member labels)` pairs.
    ///
    /// Entity indices follow the order in which labels are listed, group by
    /// group.
    ///
    /// # Errors
    ///
    /// See [`ChordData::new`].
    pub fn from_groups<I, G, L>(groups: I, matrix: StrengthMatrix) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (G, Vec<L>)>,
        G: Into<String>,
        L: Into<String>,
    {
        let mut labels = Vec::new();
        let mut built = Vec::new();
        for (name, members) in groups {
            let start = labels.len();
            labels.extend(members.into_iter().map(Into::into));
            built.push(Group::new(name, start..labels.len()));
        }
        Self::new(labels, built, matrix)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the model has no entities.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of the entity at `index`, if it exists.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the entity carrying `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The group that owns entity `index`.
    pub fn group_of(&self, index: usize) -> Option<&Group> {
        self.groups.iter().find(|group| group.contains(index))
    }

    pub fn matrix(&self) -> &StrengthMatrix {
        &self.matrix
    }

    /// Total flow (row sum of absolute values) per entity.
    pub fn flows(&self) -> Vec<f64> {
        self.matrix.flows()
    }

    /// Restricts the model to the entities at `indices`.
    ///
    /// Indices are sorted and deduplicated first, so original label order is
    /// kept regardless of the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfBounds`] if any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Result<Self, ModelError> {
        if let Some(&index) = indices.iter().find(|&&index| index >= self.len()) {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.retain(|index| indices.contains(&index)))
    }

    /// Keeps the entities for which `keep(index)` returns `true`.
    ///
    /// Surviving entities keep their relative order. Groups are renumbered
    /// into the new contiguous range and any group left without members is
    /// dropped.
    pub fn retain(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        let kept: Vec<usize> = (0..self.len()).filter(|&index| keep(index)).collect();

        let labels = kept.iter().map(|&i| self.labels[i].clone()).collect();

        let mut groups = Vec::new();
        let mut start = 0;
        for group in &self.groups {
            let count = kept.iter().filter(|&&i| group.contains(i)).count();
            if count > 0 {
                groups.push(Group::new(group.name(), start..start + count));
                start += count;
            }
        }

        trace!(kept = kept.len(), dropped = self.len() - kept.len(); "Chord data restricted");

        Self {
            labels,
            groups,
            matrix: self.matrix.select(&kept),
        }
    }
}

fn validate_groups(groups: &[Group], len: usize) -> Result<(), ModelError> {
    let mut names = HashSet::with_capacity(groups.len());
    let mut expected_start = 0;
    for group in groups {
        if !names.insert(group.name()) {
            return Err(ModelError::InvalidGroups(format!(
                "group `{}` is listed more than once",
                group.name()
            )));
        }
        if group.is_empty() {
            return Err(ModelError::InvalidGroups(format!(
                "group `{}` is empty",
                group.name()
            )));
        }
        if group.range.start != expected_start {
            return Err(ModelError::InvalidGroups(format!(
                "group `{}` starts at {}, expected {}",
                group.name(),
                group.range.start,
                expected_start
            )));
        }
        expected_start = group.range.end;
    }

    if expected_start != len {
        return Err(ModelError::InvalidGroups(format!(
            "groups cover {expected_start} entities, expected {len}"
        )));
    }

    Ok(())
}
