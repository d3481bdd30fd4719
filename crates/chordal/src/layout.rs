//! Chord layout computation.
//!
//! This module turns a [`ChordData`] model and a [`LayoutConfig`] into a
//! [`Layout`]: one angular [`Arc`] per entity and one [`Ribbon`] per connected
//! pair. Computation happens in dependency order:
//!
//! 1. [`order`] resolves the visitation order of the arcs.
//! 2. [`arcs`] allocates each entity an arc proportional to its flow.
//! 3. [`ribbons`] packs ribbon endpoints into the arcs.
//!
//! Every call is a pure recomputation: identical inputs produce a
//! bit-identical layout.

mod arcs;
mod order;
pub mod path;
mod ribbons;

pub use order::resolve_visitation_order;

use std::{f64::consts::PI, rc::Rc};

use log::{debug, info, trace};
use serde::Serialize;

use chordal_core::{
    geometry::{self, Point},
    model::ChordData,
};

use crate::{ChordalError, config::LayoutConfig};

/// An entity's angular segment on the circle.
///
/// `start <= end` holds regardless of the layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arc {
    index: usize,
    start: f64,
    end: f64,
    value: f64,
}

impl Arc {
    pub(crate) fn new(index: usize, start: f64, end: f64, value: f64) -> Self {
        Self {
            index,
            start: start.min(end),
            end: start.max(end),
            value,
        }
    }

    /// Index of the entity owning this arc.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// The entity's total flow.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Angular width of the arc.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One side of a ribbon: a sub-interval of its owner's arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RibbonEnd {
    index: usize,
    start: f64,
    end: f64,
    value: f64,
}

impl RibbonEnd {
    /// Index of the entity whose arc holds this endpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// The original, possibly signed, matrix value on the owner's row.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// A connection between two distinct entities.
///
/// `source.index() < target.index()` by construction, but the connection is
/// semantically undirected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ribbon {
    source: RibbonEnd,
    target: RibbonEnd,
}

impl Ribbon {
    pub fn source(&self) -> &RibbonEnd {
        &self.source
    }

    pub fn target(&self) -> &RibbonEnd {
        &self.target
    }

    /// The original signed value of the pair, as stored on the source row.
    ///
    /// Geometry is sized from the magnitude; the sign is kept for presentation.
    pub fn value(&self) -> f64 {
        self.source.value
    }

    /// Absolute value of [`value`](Self::value).
    pub fn magnitude(&self) -> f64 {
        self.source.value.abs()
    }

    /// Returns `true` if the stored value is negative (e.g. a decrease between
    /// two snapshots).
    pub fn is_negative(&self) -> bool {
        self.source.value < 0.0
    }

    /// Returns `true` if either endpoint belongs to entity `index`.
    pub fn touches(&self, index: usize) -> bool {
        self.source.index == index || self.target.index == index
    }
}

/// Where and how to place an entity's label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelAnchor {
    /// Anchor point, outside the arc band.
    pub position: Point,
    /// Angle of the arc midpoint.
    pub angle: f64,
    /// Text rotation keeping the label upright.
    pub rotation: f64,
    /// `true` when the label sits on the left half and was rotated by π;
    /// renderers should right-align such labels.
    pub flipped: bool,
}

/// The immutable result of a layout computation.
///
/// Filtering produces new layouts that share the arc list with the original
/// and replace only the ribbon list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    inner_radius: f64,
    outer_radius: f64,
    gap: f64,
    order: Rc<[usize]>,
    arcs: Rc<[Arc]>,
    ribbons: Vec<Ribbon>,
}

impl Layout {
    /// All arcs, addressable by entity index.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// The arc of entity `index`, if it exists.
    pub fn arc(&self, index: usize) -> Option<&Arc> {
        self.arcs.get(index)
    }

    /// Ribbons in matrix scan order (upper triangle, row-major).
    pub fn ribbons(&self) -> &[Ribbon] {
        &self.ribbons
    }

    /// The order in which arcs were placed around the circle.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// The realized angular size of each gap.
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Arcs in the order they were placed around the circle.
    pub fn arcs_in_visitation_order(&self) -> impl Iterator<Item = &Arc> + '_ {
        self.order.iter().map(|&index| &self.arcs[index])
    }

    /// Ribbons with an endpoint on entity `index`.
    pub fn ribbons_of(&self, index: usize) -> impl Iterator<Item = &Ribbon> + '_ {
        self.ribbons.iter().filter(move |ribbon| ribbon.touches(index))
    }

    /// Label placement for entity `index`, `offset` beyond the outer radius.
    pub fn label_anchor(&self, index: usize, offset: f64) -> Option<LabelAnchor> {
        let arc = self.arc(index)?;
        let angle = arc.mid_angle();
        let flipped = geometry::is_left_half(angle);
        let rotation = if flipped { angle + PI } else { angle };

        Some(LabelAnchor {
            position: Point::from_polar(self.outer_radius + offset, angle),
            angle,
            rotation,
            flipped,
        })
    }

    /// A new layout sharing this layout's arcs with a replaced ribbon list.
    pub(crate) fn with_ribbons(&self, ribbons: Vec<Ribbon>) -> Self {
        Self {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            gap: self.gap,
            order: Rc::clone(&self.order),
            arcs: Rc::clone(&self.arcs),
            ribbons,
        }
    }
}

/// Computes the full chord layout of `data` under `config`.
///
/// # Errors
///
/// - [`ChordalError::Configuration`] if the fixed order is not a permutation
///   of the entity indices.
/// - [`ChordalError::Domain`] if the total flow is not positive.
pub fn compute_layout(data: &ChordData, config: &LayoutConfig) -> Result<Layout, ChordalError> {
    info!(entities = data.len(), sort_by:% = config.sort_by(); "Computing chord layout");

    let order = resolve_visitation_order(data, config.sort_by(), config.fixed_order())?;
    trace!(order:?; "Visitation order resolved");

    let flows = data.flows();
    let allocation = arcs::allocate(&flows, &order, config)?;
    debug!(gap = allocation.gap; "Arcs allocated");

    let ribbons = ribbons::pack(
        data.matrix(),
        &allocation.arcs,
        config.ribbon_width_power(),
    );
    debug!(ribbons = ribbons.len(); "Ribbons packed");

    Ok(Layout {
        inner_radius: config.inner_radius(),
        outer_radius: config.outer_radius(),
        gap: allocation.gap,
        order: order.into(),
        arcs: allocation.arcs.into(),
        ribbons,
    })
}
