//! Ribbon endpoint packing.
//!
//! Every connected pair `(i, j)` with `i < j` gets one ribbon whose two
//! endpoints are sub-intervals of arcs `i` and `j`. Endpoints are packed into
//! each arc in ascending angle, in row-major upper-triangle scan order. The
//! per-arc packing position lives in a cursor array indexed like the arcs.
//!
//! Widths are proportional to `|value| / flow` of the owning arc. With a width
//! power other than one, each ratio is raised to that power and renormalized
//! per arc, so endpoints still partition their arc exactly.

use log::trace;

use chordal_core::model::StrengthMatrix;

use super::{Arc, Ribbon, RibbonEnd};

/// How endpoint widths are derived from matrix values.
enum Widths {
    /// Plain proportional partition of the owner's arc.
    Linear,
    /// Ratios raised to `power`, normalized by the per-arc sum of ratios.
    Power { power: f64, denominators: Vec<f64> },
}

impl Widths {
    fn new(matrix: &StrengthMatrix, arcs: &[Arc], power: f64) -> Self {
        if power == 1.0 {
            return Widths::Linear;
        }

        let mut denominators = vec![0.0; arcs.len()];
        for_each_pair(matrix, |i, j, forward, backward| {
            denominators[i] += ratio(&arcs[i], forward, power);
            denominators[j] += ratio(&arcs[j], backward, power);
        });
        trace!(denominators:?; "Ribbon width denominators computed");

        Widths::Power {
            power,
            denominators,
        }
    }

    /// Width of an endpoint carrying `value` on `arc`.
    ///
    /// Degenerate arcs (no flow, no normalization mass) yield zero width.
    fn width(&self, arc: &Arc, value: f64) -> f64 {
        if arc.value() <= 0.0 {
            return 0.0;
        }
        match self {
            Widths::Linear => arc.span() * value.abs() / arc.value(),
            Widths::Power {
                power,
                denominators,
            } => {
                let denominator = denominators[arc.index()];
                if denominator.is_nan() || denominator <= 0.0 {
                    return 0.0;
                }
                arc.span() * ratio(arc, value, *power) / denominator
            }
        }
    }
}

/// `(|value| / flow) ^ power`, or zero for an arc without flow.
fn ratio(arc: &Arc, value: f64, power: f64) -> f64 {
    if arc.value() > 0.0 {
        (value.abs() / arc.value()).powf(power)
    } else {
        0.0
    }
}

/// Calls `f(i, j, M[i][j], M[j][i])` for every connected pair with `i < j`,
/// in row-major order.
fn for_each_pair(matrix: &StrengthMatrix, mut f: impl FnMut(usize, usize, f64, f64)) {
    let n = matrix.dim();
    for i in 0..n {
        for j in i + 1..n {
            let forward = matrix.get(i, j);
            let backward = matrix.get(j, i);
            if forward != 0.0 || backward != 0.0 {
                f(i, j, forward, backward);
            }
        }
    }
}

/// Places an endpoint of `width` at the cursor of `arc` and advances it.
fn place(cursor: &mut [f64], arc: &Arc, width: f64, value: f64) -> RibbonEnd {
    let start = cursor[arc.index()];
    let end = (start + width).min(arc.end());
    cursor[arc.index()] = end;

    RibbonEnd {
        index: arc.index(),
        start,
        end,
        value,
    }
}

/// Packs one ribbon per connected pair of `matrix` into `arcs`.
pub(super) fn pack(matrix: &StrengthMatrix, arcs: &[Arc], power: f64) -> Vec<Ribbon> {
    let widths = Widths::new(matrix, arcs, power);
    let mut cursor: Vec<f64> = arcs.iter().map(Arc::start).collect();
    let mut ribbons = Vec::new();

    for_each_pair(matrix, |i, j, forward, backward| {
        let source = place(&mut cursor, &arcs[i], widths.width(&arcs[i], forward), forward);
        let target = place(&mut cursor, &arcs[j], widths.width(&arcs[j], backward), backward);
        ribbons.push(Ribbon { source, target });
    });

    ribbons
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn arcs_for(matrix: &StrengthMatrix, spans: &[f64]) -> Vec<Arc> {
        let flows = matrix.flows();
        let mut start = 0.0;
        spans
            .iter()
            .enumerate()
            .map(|(index, &span)| {
                let arc = Arc::new(index, start, start + span, flows[index]);
                start += span + 0.1;
                arc
            })
            .collect()
    }

    #[test]
    fn test_linear_widths_partition_arc() {
        let matrix = StrengthMatrix::from_rows(vec![
            vec![0.0, 1.0, 3.0],
            vec![1.0, 0.0, 0.0],
            vec![3.0, 0.0, 0.0],
        ])
        .unwrap();
        let arcs = arcs_for(&matrix, &[2.0, 0.5, 1.5]);

        let ribbons = pack(&matrix, &arcs, 1.0);

        assert_eq!(ribbons.len(), 2);
        assert_approx_eq!(f64, ribbons[0].source().span(), 0.5);
        assert_approx_eq!(f64, ribbons[1].source().span(), 1.5);
        assert_approx_eq!(f64, ribbons[1].source().end(), arcs[0].end());
        assert_approx_eq!(f64, ribbons[0].target().span(), 0.5);
        assert_approx_eq!(f64, ribbons[1].target().span(), 1.5);
    }

    #[test]
    fn test_power_below_one_flattens_widths() {
        let matrix = StrengthMatrix::from_rows(vec![
            vec![0.0, 1.0, 9.0],
            vec![1.0, 0.0, 0.0],
            vec![9.0, 0.0, 0.0],
        ])
        .unwrap();
        let arcs = arcs_for(&matrix, &[1.0, 0.1, 0.9]);

        let ribbons = pack(&matrix, &arcs, 0.5);
        let thin = ribbons[0].source().span();
        let thick = ribbons[1].source().span();

        assert!(thick / thin < 9.0);
        assert_approx_eq!(f64, thick / thin, 3.0, epsilon = 1e-9);
        assert_approx_eq!(f64, thin + thick, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_asymmetric_entries_use_owner_row() {
        let matrix = StrengthMatrix::from_rows(vec![vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
        let arcs = arcs_for(&matrix, &[1.0, 0.0]);

        let ribbons = pack(&matrix, &arcs, 1.0);

        assert_eq!(ribbons.len(), 1);
        assert_eq!(ribbons[0].source().value(), 2.0);
        assert_eq!(ribbons[0].target().value(), 0.0);
        assert_eq!(ribbons[0].target().span(), 0.0);
    }

    #[test]
    fn test_zero_flow_arc_gets_zero_width_with_power() {
        let matrix = StrengthMatrix::from_rows(vec![vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
        let arcs = arcs_for(&matrix, &[1.0, 0.0]);

        let ribbons = pack(&matrix, &arcs, 3.0);

        assert_approx_eq!(f64, ribbons[0].source().span(), 1.0);
        assert_eq!(ribbons[0].target().span(), 0.0);
        assert!(ribbons[0].target().start().is_finite());
    }

    #[test]
    fn test_diagonal_is_not_packed() {
        let matrix = StrengthMatrix::from_rows(vec![vec![5.0, 5.0], vec![5.0, 0.0]]).unwrap();
        let arcs = arcs_for(&matrix, &[2.0, 1.0]);

        let linear = pack(&matrix, &arcs, 1.0);
        assert_eq!(linear.len(), 1);
        // Half of arc 0 belongs to the self-pair and stays unused.
        assert_approx_eq!(f64, linear[0].source().span(), 1.0);

        let shaped = pack(&matrix, &arcs, 2.0);
        assert_approx_eq!(f64, shaped[0].source().span(), 2.0);
    }
}
