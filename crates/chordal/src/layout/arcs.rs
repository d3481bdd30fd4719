//! Arc allocation: turns per-entity flow into angular segments.

use std::f64::consts::TAU;

use log::trace;

use super::Arc;
use crate::{ChordalError, config::LayoutConfig};

/// Arcs indexed by entity, plus the realized gap between consecutive arcs.
#[derive(Debug)]
pub(super) struct Allocation {
    pub(super) arcs: Vec<Arc>,
    pub(super) gap: f64,
}

/// Allocates one arc per entity, walking `order` from the configured start
/// angle in the configured direction.
///
/// Each arc spans `content_angle * flow / total_flow`. The remaining angle is
/// split into one gap after every arc, including the last, so that arcs and
/// gaps tile the full circle.
pub(super) fn allocate(
    flows: &[f64],
    order: &[usize],
    config: &LayoutConfig,
) -> Result<Allocation, ChordalError> {
    let total_flow: f64 = flows.iter().sum();
    if total_flow <= 0.0 {
        return Err(ChordalError::Domain(format!(
            "total flow must be positive, got {total_flow} over {} entities",
            flows.len()
        )));
    }

    let content_angle = config.content_angle();
    let gap = (TAU - content_angle) / flows.len() as f64;
    let sign = config.direction().sign();

    let mut arcs: Vec<Arc> = flows
        .iter()
        .enumerate()
        .map(|(index, &flow)| Arc::new(index, config.start_angle(), config.start_angle(), flow))
        .collect();

    let mut position = config.start_angle();
    for &index in order {
        let width = content_angle * flows[index] / total_flow;
        let end = position + sign * width;
        arcs[index] = Arc::new(index, position, end, flows[index]);
        trace!(index = index, start = arcs[index].start(), end = arcs[index].end(); "Arc placed");
        position = end + sign * gap;
    }

    Ok(Allocation { arcs, gap })
}
