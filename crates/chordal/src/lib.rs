//! Chordal - Geometric layout of chord diagrams.
//!
//! Given a symmetric matrix of pairwise strengths between labeled, grouped
//! entities, Chordal assigns each entity an angular arc on a circle sized by
//! its total flow, and computes for every non-zero pair the two ribbon
//! endpoints nested inside the arcs it connects.
//!
//! The core entry points are pure functions:
//!
//! - [`compute_layout`] - full layout from a data model and configuration
//! - [`resolve_visitation_order`] - arc order only, for aligning related diagrams
//! - [`filter`] - ribbon and entity filters
//! - [`reconcile`] - alignment of several data models onto one label set
//!
//! [`ChordBuilder`] wraps them behind a single configuration.

pub mod config;
pub mod filter;
pub mod layout;
pub mod reconcile;

mod error;

pub use chordal_core::{geometry, model};

pub use error::ChordalError;
pub use filter::{
    filter_entities_by_min_aggregate_flow, filter_entities_top_n, filter_ribbons_by_value,
    filter_ribbons_top_n,
};
pub use layout::{Layout, compute_layout, resolve_visitation_order};

use log::{debug, info};

use config::AppConfig;
use model::ChordData;

/// Builder for filtering and laying out chord diagrams.
///
/// Applies the configured entity filters, computes the layout, and then
/// applies the configured ribbon filters.
///
/// # Examples
///
/// ```rust
/// use chordal::{ChordBuilder, config::AppConfig, model::{ChordData, StrengthMatrix}};
///
/// let matrix = StrengthMatrix::from_rows(vec![
///     vec![0.0, 3.0, 1.0],
///     vec![3.0, 0.0, 2.0],
///     vec![1.0, 2.0, 0.0],
/// ])
/// .expect("square matrix");
/// let data = ChordData::from_groups([("all", vec!["a", "b", "c"])], matrix)
///     .expect("valid model");
///
/// let builder = ChordBuilder::new(AppConfig::default());
/// let layout = builder.layout(&data).expect("layout");
///
/// assert_eq!(layout.arcs().len(), 3);
/// assert_eq!(layout.ribbons().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ChordBuilder {
    config: AppConfig,
}

impl ChordBuilder {
    /// Create a new chord builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder applies.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Apply the configured entity filters to `data`.
    pub fn prepare(&self, data: &ChordData) -> ChordData {
        let filter = self.config.filter();
        let mut data = data.clone();

        if let Some(n) = filter.top_entities() {
            data = filter_entities_top_n(&data, n);
        }
        if let Some(min_flow) = filter.min_entity_flow() {
            data = filter_entities_by_min_aggregate_flow(&data, min_flow);
        }

        data
    }

    /// Filter, lay out, and filter again.
    ///
    /// A configured fixed order applies to the entities remaining after the
    /// entity filters.
    ///
    /// # Errors
    ///
    /// Returns `ChordalError` for configuration or domain errors raised by
    /// [`compute_layout`].
    pub fn layout(&self, data: &ChordData) -> Result<Layout, ChordalError> {
        let prepared = self.prepare(data);
        debug!(
            entities = prepared.len(),
            dropped = data.len() - prepared.len();
            "Entity filters applied"
        );

        self.layout_prepared(&prepared)
    }

    /// Lay out data that already went through [`prepare`](Self::prepare),
    /// then apply the configured ribbon filters.
    ///
    /// Callers that need the surviving labels alongside the layout use this
    /// together with `prepare`.
    ///
    /// # Errors
    ///
    /// See [`layout`](Self::layout).
    pub fn layout_prepared(&self, prepared: &ChordData) -> Result<Layout, ChordalError> {
        let mut layout = compute_layout(prepared, self.config.layout())?;

        let filter = self.config.filter();
        if let Some(min_value) = filter.min_ribbon_value() {
            layout = filter_ribbons_by_value(&layout, min_value);
        }
        if let Some(n) = filter.top_ribbons() {
            layout = filter_ribbons_top_n(&layout, n);
        }

        info!(
            arcs = layout.arcs().len(),
            ribbons = layout.ribbons().len();
            "Chord layout ready"
        );

        Ok(layout)
    }
}
