//! Reconciliation of several data models onto one shared entity set.
//!
//! Related diagrams (e.g. two snapshots of the same system) are easiest to
//! compare when every entity sits at the same circular position in each. The
//! functions here align models onto a common label set so that one visitation
//! order can be applied to all of them:
//!
//! - [`intersect`] keeps only labels present in every model.
//! - [`union`] keeps every label and fills missing cells with zeros.
//! - [`difference`] builds the signed `after - before` model over the union.
//! - [`shared_order`] resolves one visitation order for the union.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use chordal_core::model::{ChordData, Group, StrengthMatrix};

use crate::{ChordalError, config::SortBy, layout::resolve_visitation_order};

/// The shared entity set that models are aligned onto.
struct Alignment {
    labels: Vec<String>,
    groups: Vec<Group>,
}

impl Alignment {
    /// Builds an alignment from `(group, labels)` blocks in insertion order.
    fn from_blocks(blocks: IndexMap<String, Vec<String>>) -> Self {
        let mut labels = Vec::new();
        let mut groups = Vec::new();
        for (name, members) in blocks {
            if members.is_empty() {
                continue;
            }
            let start = labels.len();
            labels.extend(members);
            groups.push(Group::new(name, start..labels.len()));
        }
        Self { labels, groups }
    }

    /// Re-expresses `model` over this alignment, zero-filling absent labels.
    fn apply(&self, model: &ChordData) -> Result<ChordData, ChordalError> {
        self.combine(|row, column| cell(model, row, column))
    }

    /// Builds a model over this alignment whose cells are `f(row, column)`.
    fn combine(
        &self,
        mut f: impl FnMut(&str, &str) -> f64,
    ) -> Result<ChordData, ChordalError> {
        let matrix = StrengthMatrix::from_fn(self.labels.len(), |row, column| {
            f(&self.labels[row], &self.labels[column])
        })?;
        Ok(ChordData::new(self.labels.clone(), self.groups.clone(), matrix)?)
    }
}

/// Value between two labels in `model`, or zero if either label is absent.
fn cell(model: &ChordData, row: &str, column: &str) -> f64 {
    match (model.index_of(row), model.index_of(column)) {
        (Some(row), Some(column)) => model.matrix().get(row, column),
        _ => 0.0,
    }
}

/// Aligns `models` onto the labels present in all of them.
///
/// Label order and grouping follow the first model. An empty slice yields an
/// empty result.
///
/// # Errors
///
/// Propagates data model construction errors.
pub fn intersect(models: &[ChordData]) -> Result<Vec<ChordData>, ChordalError> {
    let Some((first, rest)) = models.split_first() else {
        return Ok(Vec::new());
    };

    let mut blocks: IndexMap<String, Vec<String>> = IndexMap::new();
    for group in first.groups() {
        let members = group
            .range()
            .map(|index| first.labels()[index].clone())
            .filter(|label| rest.iter().all(|model| model.index_of(label).is_some()))
            .collect();
        blocks.insert(group.name().to_string(), members);
    }

    let alignment = Alignment::from_blocks(blocks);
    info!(
        models = models.len(),
        shared = alignment.labels.len();
        "Aligned models on shared labels"
    );

    models.iter().map(|model| alignment.apply(model)).collect()
}

/// Aligns `models` onto the union of their labels.
///
/// The first model's groups come first, in order; labels unseen so far are
/// appended to their group as later models are visited, and new groups are
/// appended at the end. A label belongs to the group it was first seen in.
///
/// # Errors
///
/// Propagates data model construction errors.
pub fn union(models: &[ChordData]) -> Result<Vec<ChordData>, ChordalError> {
    let alignment = union_alignment(models);
    info!(
        models = models.len(),
        labels = alignment.labels.len();
        "Aligned models on all labels"
    );

    models.iter().map(|model| alignment.apply(model)).collect()
}

fn union_alignment<'a>(models: impl IntoIterator<Item = &'a ChordData>) -> Alignment {
    let mut seen: IndexSet<&'a str> = IndexSet::new();
    let mut blocks: IndexMap<String, Vec<String>> = IndexMap::new();

    for model in models {
        for group in model.groups() {
            for index in group.range() {
                let label = &model.labels()[index];
                if seen.insert(label.as_str()) {
                    blocks
                        .entry(group.name().to_string())
                        .or_default()
                        .push(label.clone());
                }
            }
        }
    }

    Alignment::from_blocks(blocks)
}

/// Signed change from `before` to `after`, over the union of their labels.
///
/// Each cell is `after - before`. Laid out, geometry follows the magnitude of
/// each change while ribbons keep its sign.
///
/// # Errors
///
/// Returns [`ChordalError::Dimension`] if a difference overflows to infinity.
pub fn difference(before: &ChordData, after: &ChordData) -> Result<ChordData, ChordalError> {
    let alignment = union_alignment([before, after]);
    debug!(labels = alignment.labels.len(); "Computing model difference");

    alignment.combine(|row, column| cell(after, row, column) - cell(before, row, column))
}

/// Resolves one visitation order for the union of `models`.
///
/// Flows are taken from the sum of absolute values across all models, so an
/// entity that is large in any snapshot is ranked accordingly. The returned
/// indices refer to the label order produced by [`union`].
///
/// # Errors
///
/// Propagates data model construction errors.
pub fn shared_order(models: &[ChordData], sort_by: SortBy) -> Result<Vec<usize>, ChordalError> {
    let alignment = union_alignment(models);
    let positions: Vec<HashMap<&str, usize>> = models
        .iter()
        .map(|model| {
            model
                .labels()
                .iter()
                .enumerate()
                .map(|(index, label)| (label.as_str(), index))
                .collect()
        })
        .collect();

    let combined = alignment.combine(|row, column| {
        models
            .iter()
            .zip(&positions)
            .filter_map(|(model, position)| {
                Some(model.matrix().get(*position.get(row)?, *position.get(column)?).abs())
            })
            .sum()
    })?;

    resolve_visitation_order(&combined, sort_by, None)
}
