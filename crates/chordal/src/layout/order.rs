//! Visitation order resolution.
//!
//! The visitation order is the permutation in which arcs are placed around the
//! circle. It is exposed on its own so that hosts can align several related
//! diagrams to the same circular positions without computing full layouts.

use std::ops::Range;

use log::debug;

use chordal_core::model::ChordData;

use crate::{ChordalError, config::SortBy};

/// Resolves the order in which entity arcs are placed around the circle.
///
/// A `fixed_order` always wins over `sort_by`. Without one:
/// - [`SortBy::None`] keeps entity index order.
/// - [`SortBy::Value`] sorts by descending flow; equal flows keep index order.
/// - [`SortBy::Group`] visits groups in their original order and sorts each
///   group by descending flow.
///
/// # Errors
///
/// Returns [`ChordalError::Configuration`] if `fixed_order` is not a
/// permutation of `0..data.len()`.
pub fn resolve_visitation_order(
    data: &ChordData,
    sort_by: SortBy,
    fixed_order: Option<&[usize]>,
) -> Result<Vec<usize>, ChordalError> {
    if let Some(order) = fixed_order {
        validate_permutation(order, data.len())?;
        debug!(entities = data.len(); "Using fixed visitation order");
        return Ok(order.to_vec());
    }

    let flows = data.flows();
    let order = match sort_by {
        SortBy::None => (0..data.len()).collect(),
        SortBy::Value => by_descending_flow(0..data.len(), &flows),
        SortBy::Group => data
            .groups()
            .iter()
            .flat_map(|group| by_descending_flow(group.range(), &flows))
            .collect(),
    };

    Ok(order)
}

/// Stable sort of `indices` by descending flow.
fn by_descending_flow(indices: Range<usize>, flows: &[f64]) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices.collect();
    sorted.sort_by(|&a, &b| flows[b].total_cmp(&flows[a]));
    sorted
}

fn validate_permutation(order: &[usize], len: usize) -> Result<(), ChordalError> {
    if order.len() != len {
        return Err(ChordalError::configuration(
            "fixed_order",
            format!("{order:?}"),
            format!("expected {len} indices, got {}", order.len()),
        ));
    }

    let mut seen = vec![false; len];
    for &index in order {
        if index >= len {
            return Err(ChordalError::configuration(
                "fixed_order",
                format!("{order:?}"),
                format!("index {index} out of range for {len} entities"),
            ));
        }
        if seen[index] {
            return Err(ChordalError::configuration(
                "fixed_order",
                format!("{order:?}"),
                format!("not a permutation: index {index} appears more than once"),
            ));
        }
        seen[index] = true;
    }

    Ok(())
}
