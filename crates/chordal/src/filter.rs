//! Ribbon and entity filters.
//!
//! Ribbon filters operate on a finished [`Layout`] and leave its arcs
//! untouched. Entity filters operate on the [`ChordData`] model before layout:
//! they slice the matrix and renumber groups, so arcs are re-allocated for the
//! surviving entities only.

use log::debug;

use chordal_core::model::ChordData;

use crate::layout::Layout;

/// Keeps ribbons whose absolute value is at least `min_value`.
///
/// Order is preserved.
pub fn filter_ribbons_by_value(layout: &Layout, min_value: f64) -> Layout {
    let ribbons: Vec<_> = layout
        .ribbons()
        .iter()
        .filter(|ribbon| ribbon.magnitude() >= min_value)
        .copied()
        .collect();

    debug!(
        kept = ribbons.len(),
        dropped = layout.ribbons().len() - ribbons.len(),
        min_value = min_value;
        "Ribbons filtered by value"
    );

    layout.with_ribbons(ribbons)
}

/// Keeps the `n` ribbons with the largest absolute value, strongest first.
///
/// Ranking is by magnitude, not signed value: in a signed (difference) model a
/// ribbon of `-5` outranks one of `3`. For non-negative data the two orders
/// agree. Ties keep their original relative order. When `n` is at least the
/// ribbon count, the ribbon list is returned unchanged.
pub fn filter_ribbons_top_n(layout: &Layout, n: usize) -> Layout {
    if n >= layout.ribbons().len() {
        return layout.with_ribbons(layout.ribbons().to_vec());
    }

    let mut ribbons = layout.ribbons().to_vec();
    ribbons.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
    ribbons.truncate(n);

    debug!(kept = n; "Ribbons filtered to top n");

    layout.with_ribbons(ribbons)
}

/// Keeps the `n` entities with the highest total flow.
///
/// Ties are broken in favor of the lower index. Survivors keep their original
/// relative order and grouping.
pub fn filter_entities_top_n(data: &ChordData, n: usize) -> ChordData {
    if n >= data.len() {
        return data.clone();
    }

    let flows = data.flows();
    let mut ranked: Vec<usize> = (0..data.len()).collect();
    ranked.sort_by(|&a, &b| flows[b].total_cmp(&flows[a]));

    let mut keep = vec![false; data.len()];
    for &index in &ranked[..n] {
        keep[index] = true;
    }

    debug!(kept = n, total = data.len(); "Entities filtered to top n");

    data.retain(|index| keep[index])
}

/// Keeps entities whose total flow is at least `min_flow`.
pub fn filter_entities_by_min_aggregate_flow(data: &ChordData, min_flow: f64) -> ChordData {
    let flows = data.flows();
    let filtered = data.retain(|index| flows[index] >= min_flow);

    debug!(
        kept = filtered.len(),
        total = data.len(),
        min_flow = min_flow;
        "Entities filtered by aggregate flow"
    );

    filtered
}
