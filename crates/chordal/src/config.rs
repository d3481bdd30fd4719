//! Configuration types for Chordal layouts.
//!
//! This module provides configuration structures that control how chord
//! diagrams are laid out and filtered. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and filter settings.
//! - [`LayoutConfig`] - Geometry and ordering of arcs and ribbons. Always valid:
//!   built through [`LayoutConfigBuilder::build`] or deserialized with the same
//!   validation.
//! - [`FilterConfig`] - Optional entity and ribbon filters.
//! - [`SortBy`] / [`Direction`] - Tagged choices for ordering and rotation.
//! - [`RawAppConfig`] / [`RawLayoutConfig`] - The unvalidated file form. Hosts
//!   that report configuration errors themselves deserialize these and call
//!   [`RawAppConfig::validate`], which yields [`ChordalError::Configuration`]
//!   rather than a stringified deserializer error.
//!
//! # Example
//!
//! ```
//! # use chordal::config::{LayoutConfig, SortBy};
//! let config = LayoutConfig::builder()
//!     .with_gap_fraction(0.05)
//!     .with_sort_by(SortBy::Value)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.sort_by(), SortBy::Value);
//! ```

use std::{f64::consts::TAU, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ChordalError;

/// Top-level configuration combining layout and filter settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawAppConfig")]
pub struct AppConfig {
    layout: LayoutConfig,
    filter: FilterConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and filter configurations.
    pub fn new(layout: LayoutConfig, filter: FilterConfig) -> Self {
        Self { layout, filter }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }
}

/// Policy deciding the order in which arcs are placed around the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortBy {
    /// Original entity index order.
    None,
    /// Descending total flow, ties kept in index order.
    Value,
    /// Groups in their original order, descending flow within each group.
    #[default]
    Group,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::None => "none",
            SortBy::Value => "value",
            SortBy::Group => "group",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ChordalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortBy::None),
            "value" => Ok(SortBy::Value),
            "group" => Ok(SortBy::Group),
            other => Err(ChordalError::configuration(
                "sort_by",
                format!("{other:?}"),
                "expected one of \"none\", \"value\", \"group\"",
            )),
        }
    }
}

impl TryFrom<String> for SortBy {
    type Error = ChordalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortBy> for String {
    fn from(value: SortBy) -> Self {
        value.as_str().to_string()
    }
}

/// Rotational direction in which arcs are laid out.
///
/// Serialized as the integers `1` and `-1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Direction {
    /// Increasing angle (`+1`).
    #[default]
    CounterClockwise,
    /// Decreasing angle (`-1`).
    Clockwise,
}

impl Direction {
    /// The sign applied to every angular step.
    pub fn sign(self) -> f64 {
        match self {
            Direction::CounterClockwise => 1.0,
            Direction::Clockwise => -1.0,
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = ChordalError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::CounterClockwise),
            -1 => Ok(Direction::Clockwise),
            other => Err(ChordalError::configuration(
                "direction",
                other,
                "expected 1 or -1",
            )),
        }
    }
}

impl From<Direction> for i64 {
    fn from(value: Direction) -> Self {
        match value {
            Direction::CounterClockwise => 1,
            Direction::Clockwise => -1,
        }
    }
}

/// Geometry and ordering configuration for a chord layout.
///
/// Instances are always valid: every constructor runs the same checks as
/// [`LayoutConfigBuilder::build`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLayoutConfig")]
pub struct LayoutConfig {
    inner_radius: f64,
    outer_radius: f64,
    gap_fraction: f64,
    arc_scale: f64,
    start_angle: f64,
    direction: Direction,
    sort_by: SortBy,
    fixed_order: Option<Vec<usize>>,
    ribbon_width_power: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let defaults = LayoutConfigBuilder::default();
        Self {
            inner_radius: defaults.inner_radius,
            outer_radius: defaults.outer_radius,
            gap_fraction: defaults.gap_fraction,
            arc_scale: defaults.arc_scale,
            start_angle: defaults.start_angle,
            direction: defaults.direction,
            sort_by: defaults.sort_by,
            fixed_order: None,
            ribbon_width_power: defaults.ribbon_width_power,
        }
    }
}

impl LayoutConfig {
    /// Starts building a configuration from the defaults.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Radius at which ribbons attach to arcs.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer edge of the arc band.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Baseline fraction of the circle reserved for gaps.
    pub fn gap_fraction(&self) -> f64 {
        self.gap_fraction
    }

    /// Additional shrink factor applied to the arc portion only.
    pub fn arc_scale(&self) -> f64 {
        self.arc_scale
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Explicit visitation order; overrides [`sort_by`](Self::sort_by) when set.
    pub fn fixed_order(&self) -> Option<&[usize]> {
        self.fixed_order.as_deref()
    }

    /// Exponent reshaping ribbon endpoint widths; `1.0` is linear.
    pub fn ribbon_width_power(&self) -> f64 {
        self.ribbon_width_power
    }

    /// Angle of the circle allocated to arcs, as opposed to gaps.
    pub fn content_angle(&self) -> f64 {
        TAU * (1.0 - self.gap_fraction) * self.arc_scale
    }

    /// Returns a builder seeded with this configuration.
    pub fn to_builder(&self) -> LayoutConfigBuilder {
        LayoutConfigBuilder {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            gap_fraction: self.gap_fraction,
            arc_scale: self.arc_scale,
            start_angle: self.start_angle,
            direction: self.direction,
            sort_by: self.sort_by,
            fixed_order: self.fixed_order.clone(),
            ribbon_width_power: self.ribbon_width_power,
        }
    }
}

/// Builder for [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct LayoutConfigBuilder {
    inner_radius: f64,
    outer_radius: f64,
    gap_fraction: f64,
    arc_scale: f64,
    start_angle: f64,
    direction: Direction,
    sort_by: SortBy,
    fixed_order: Option<Vec<usize>>,
    ribbon_width_power: f64,
}

impl Default for LayoutConfigBuilder {
    fn default() -> Self {
        Self {
            inner_radius: 0.9,
            outer_radius: 1.0,
            gap_fraction: 0.1,
            arc_scale: 1.0,
            start_angle: 0.0,
            direction: Direction::default(),
            sort_by: SortBy::default(),
            fixed_order: None,
            ribbon_width_power: 1.0,
        }
    }
}

impl LayoutConfigBuilder {
    /// Set the inner and outer radius of the arc band
    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    /// Set the baseline gap fraction
    pub fn with_gap_fraction(mut self, gap_fraction: f64) -> Self {
        self.gap_fraction = gap_fraction;
        self
    }

    /// Set the arc scale
    pub fn with_arc_scale(mut self, arc_scale: f64) -> Self {
        self.arc_scale = arc_scale;
        self
    }

    /// Set the angle at which the first visited arc starts
    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set an explicit visitation order, or clear it with `None`
    pub fn with_fixed_order(mut self, order: Option<Vec<usize>>) -> Self {
        self.fixed_order = order;
        self
    }

    pub fn with_ribbon_width_power(mut self, power: f64) -> Self {
        self.ribbon_width_power = power;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChordalError::Configuration`] naming the first field whose
    /// value is out of range. Fixed-order permutation checks need the entity
    /// count and happen when the order is resolved.
    pub fn build(self) -> Result<LayoutConfig, ChordalError> {
        if !(self.inner_radius.is_finite() && self.inner_radius > 0.0) {
            return Err(ChordalError::configuration(
                "inner_radius",
                self.inner_radius,
                "must be a finite value > 0",
            ));
        }
        if !(self.outer_radius.is_finite() && self.outer_radius > self.inner_radius) {
            return Err(ChordalError::configuration(
                "outer_radius",
                self.outer_radius,
                format!("must be a finite value > inner_radius ({})", self.inner_radius),
            ));
        }
        if !(0.0..1.0).contains(&self.gap_fraction) {
            return Err(ChordalError::configuration(
                "gap_fraction",
                self.gap_fraction,
                "must be in [0, 1)",
            ));
        }
        if !(self.arc_scale > 0.0 && self.arc_scale <= 1.0) {
            return Err(ChordalError::configuration(
                "arc_scale",
                self.arc_scale,
                "must be in (0, 1]",
            ));
        }
        if !self.start_angle.is_finite() {
            return Err(ChordalError::configuration(
                "start_angle",
                self.start_angle,
                "must be finite",
            ));
        }
        if !(self.ribbon_width_power.is_finite() && self.ribbon_width_power > 0.0) {
            return Err(ChordalError::configuration(
                "ribbon_width_power",
                self.ribbon_width_power,
                "must be a finite value > 0",
            ));
        }

        Ok(LayoutConfig {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            gap_fraction: self.gap_fraction,
            arc_scale: self.arc_scale,
            start_angle: self.start_angle,
            direction: self.direction,
            sort_by: self.sort_by,
            fixed_order: self.fixed_order,
            ribbon_width_power: self.ribbon_width_power,
        })
    }
}

/// The `[layout]` section as written in a configuration file.
///
/// Policy names and the direction are kept as plain values here, so a bad
/// value surfaces from [`RawLayoutConfig::validate`] as
/// [`ChordalError::Configuration`] naming its field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLayoutConfig {
    inner_radius: f64,
    outer_radius: f64,
    gap_fraction: f64,
    arc_scale: f64,
    start_angle: f64,
    direction: i64,
    sort_by: String,
    fixed_order: Option<Vec<usize>>,
    ribbon_width_power: f64,
}

impl Default for RawLayoutConfig {
    fn default() -> Self {
        let defaults = LayoutConfigBuilder::default();
        Self {
            inner_radius: defaults.inner_radius,
            outer_radius: defaults.outer_radius,
            gap_fraction: defaults.gap_fraction,
            arc_scale: defaults.arc_scale,
            start_angle: defaults.start_angle,
            direction: defaults.direction.into(),
            sort_by: defaults.sort_by.to_string(),
            fixed_order: defaults.fixed_order,
            ribbon_width_power: defaults.ribbon_width_power,
        }
    }
}

impl RawLayoutConfig {
    /// Parse the policy fields and validate every value.
    ///
    /// # Errors
    ///
    /// Returns [`ChordalError::Configuration`] for the first invalid field.
    pub fn validate(self) -> Result<LayoutConfig, ChordalError> {
        LayoutConfigBuilder {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            gap_fraction: self.gap_fraction,
            arc_scale: self.arc_scale,
            start_angle: self.start_angle,
            direction: Direction::try_from(self.direction)?,
            sort_by: self.sort_by.parse()?,
            fixed_order: self.fixed_order,
            ribbon_width_power: self.ribbon_width_power,
        }
        .build()
    }
}

impl TryFrom<RawLayoutConfig> for LayoutConfig {
    type Error = ChordalError;

    fn try_from(raw: RawLayoutConfig) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// A configuration file as written, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAppConfig {
    layout: RawLayoutConfig,
    filter: FilterConfig,
}

impl RawAppConfig {
    /// Validate both sections.
    ///
    /// # Errors
    ///
    /// Returns [`ChordalError::Configuration`] naming the first invalid
    /// `[layout]` field.
    pub fn validate(self) -> Result<AppConfig, ChordalError> {
        Ok(AppConfig::new(self.layout.validate()?, self.filter))
    }
}

impl TryFrom<RawAppConfig> for AppConfig {
    type Error = ChordalError;

    fn try_from(raw: RawAppConfig) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// Optional filters applied around the layout.
///
/// Entity filters run on the data model before layout; ribbon filters run on
/// the finished layout. Unset fields disable the corresponding filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Keep only the `n` entities with the highest total flow.
    top_entities: Option<usize>,

    /// Drop entities whose total flow is below this value.
    min_entity_flow: Option<f64>,

    /// Drop ribbons whose absolute value is below this value.
    min_ribbon_value: Option<f64>,

    /// Keep only the `n` strongest ribbons.
    top_ribbons: Option<usize>,
}

impl FilterConfig {
    pub fn with_top_entities(mut self, n: usize) -> Self {
        self.top_entities = Some(n);
        self
    }

    pub fn with_min_entity_flow(mut self, min_flow: f64) -> Self {
        self.min_entity_flow = Some(min_flow);
        self
    }

    pub fn with_min_ribbon_value(mut self, min_value: f64) -> Self {
        self.min_ribbon_value = Some(min_value);
        self
    }

    pub fn with_top_ribbons(mut self, n: usize) -> Self {
        self.top_ribbons = Some(n);
        self
    }

    pub fn top_entities(&self) -> Option<usize> {
        self.top_entities
    }

    pub fn min_entity_flow(&self) -> Option<f64> {
        self.min_entity_flow
    }

    pub fn min_ribbon_value(&self) -> Option<f64> {
        self.min_ribbon_value
    }

    pub fn top_ribbons(&self) -> Option<usize> {
        self.top_ribbons
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::default();
        assert_eq!(config.sort_by(), SortBy::Group);
        assert_eq!(config.direction(), Direction::CounterClockwise);
        assert_eq!(config.ribbon_width_power(), 1.0);
        assert!(config.fixed_order().is_none());
        assert_eq!(LayoutConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn test_content_angle_combines_gap_and_scale() {
        let config = LayoutConfig::builder()
            .with_gap_fraction(0.2)
            .with_arc_scale(0.5)
            .build()
            .unwrap();
        assert_approx_eq!(f64, config.content_angle(), TAU * 0.8 * 0.5);
    }

    #[test]
    fn test_sort_by_parses_known_names() {
        assert_eq!("none".parse::<SortBy>().unwrap(), SortBy::None);
        assert_eq!("value".parse::<SortBy>().unwrap(), SortBy::Value);
        assert_eq!("group".parse::<SortBy>().unwrap(), SortBy::Group);
    }

    #[test]
    fn test_sort_by_unknown_name_is_configuration_error() {
        let err = "size".parse::<SortBy>().unwrap_err();
        match err {
            ChordalError::Configuration { field, value, .. } => {
                assert_eq!(field, "sort_by");
                assert_eq!(value, "\"size\"");
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_direction_from_integer() {
        assert_eq!(Direction::try_from(1_i64).unwrap(), Direction::CounterClockwise);
        assert_eq!(Direction::try_from(-1_i64).unwrap(), Direction::Clockwise);
        assert!(Direction::try_from(0_i64).is_err());
        assert_eq!(Direction::Clockwise.sign(), -1.0);
    }

    #[test]
    fn test_build_rejects_out_of_range_values() {
        let cases = [
            (LayoutConfig::builder().with_radii(0.0, 1.0), "inner_radius"),
            (LayoutConfig::builder().with_radii(1.0, 1.0), "outer_radius"),
            (LayoutConfig::builder().with_gap_fraction(1.0), "gap_fraction"),
            (LayoutConfig::builder().with_gap_fraction(-0.1), "gap_fraction"),
            (LayoutConfig::builder().with_arc_scale(0.0), "arc_scale"),
            (LayoutConfig::builder().with_arc_scale(1.5), "arc_scale"),
            (LayoutConfig::builder().with_start_angle(f64::NAN), "start_angle"),
            (
                LayoutConfig::builder().with_ribbon_width_power(0.0),
                "ribbon_width_power",
            ),
        ];

        for (builder, expected) in cases {
            match builder.build() {
                Err(ChordalError::Configuration { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected Configuration error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let config: LayoutConfig = toml::from_str(
            r#"
            gap_fraction = 0.0
            sort_by = "value"
            direction = -1
            fixed_order = [1, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.gap_fraction(), 0.0);
        assert_eq!(config.sort_by(), SortBy::Value);
        assert_eq!(config.direction(), Direction::Clockwise);
        assert_eq!(config.fixed_order(), Some(&[1, 0][..]));

        assert!(toml::from_str::<LayoutConfig>("arc_scale = 2.0").is_err());
        assert!(toml::from_str::<LayoutConfig>("sort_by = \"size\"").is_err());
        assert!(toml::from_str::<LayoutConfig>("direction = 2").is_err());
    }

    #[test]
    fn test_app_config_sections_default() {
        let config: AppConfig = toml::from_str(
            r#"
            [filter]
            top_ribbons = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.layout(), &LayoutConfig::default());
        assert_eq!(config.filter().top_ribbons(), Some(5));
        assert_eq!(config.filter().min_ribbon_value(), None);
    }

    #[test]
    fn test_raw_config_reports_configuration_errors() {
        let raw: RawAppConfig = toml::from_str(
            r#"
            [layout]
            sort_by = "size"
            "#,
        )
        .unwrap();
        match raw.validate() {
            Err(ChordalError::Configuration { field, value, .. }) => {
                assert_eq!(field, "sort_by");
                assert_eq!(value, "\"size\"");
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }

        let raw: RawAppConfig = toml::from_str("[layout]\ndirection = 0\n").unwrap();
        assert!(matches!(
            raw.validate(),
            Err(ChordalError::Configuration { field: "direction", .. })
        ));
    }

    #[test]
    fn test_raw_defaults_validate_to_defaults() {
        let config = RawAppConfig::default().validate().unwrap();
        assert_eq!(config.layout(), &LayoutConfig::default());
        assert_eq!(config.filter(), &FilterConfig::default());
    }

    #[test]
    fn test_to_builder_round_trips() {
        let config = LayoutConfig::builder()
            .with_fixed_order(Some(vec![2, 0, 1]))
            .build()
            .unwrap();
        assert_eq!(config.to_builder().build().unwrap(), config);
    }
}
