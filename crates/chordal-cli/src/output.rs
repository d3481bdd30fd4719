//! Layout document written by the CLI.

use std::io;

use serde::Serialize;

use chordal::{ChordalError, Layout};
use chordal_core::model::ChordData;

/// Serialized form: the laid-out entities followed by the raw layout.
#[derive(Debug, Serialize)]
struct LayoutDocument<'a> {
    entities: Vec<Entity<'a>>,
    layout: &'a Layout,
}

#[derive(Debug, Serialize)]
struct Entity<'a> {
    index: usize,
    label: &'a str,
    group: &'a str,
}

/// Render `layout` as TOML, with entity labels taken from `data`.
///
/// `data` must be the model the layout was computed from, after any entity
/// filtering, so that arc indices line up with labels.
///
/// # Errors
///
/// Returns `ChordalError::Io` if serialization fails.
pub fn to_toml(data: &ChordData, layout: &Layout) -> Result<String, ChordalError> {
    let entities = data
        .labels()
        .iter()
        .enumerate()
        .map(|(index, label)| Entity {
            index,
            label,
            group: data.group_of(index).map_or("", |group| group.name()),
        })
        .collect();

    let document = LayoutDocument { entities, layout };
    toml::to_string(&document).map_err(|e| ChordalError::Io(io::Error::other(e.to_string())))
}
