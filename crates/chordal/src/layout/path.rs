//! Outline polygons for arcs and ribbons.
//!
//! These are thin conveniences for renderers: they sample the layout's angular
//! intervals into closed point lists that any polygon-fill backend can draw.

use chordal_core::geometry::{Point, sample_angles};

use super::{Arc, Layout, Ribbon};

/// Closed outline of an arc band between the inner and outer radius.
///
/// The outer edge is sampled with `samples` points from start to end,
/// followed by the inner edge sampled back from end to start.
pub fn arc_outline(layout: &Layout, arc: &Arc, samples: usize) -> Vec<Point> {
    let angles = sample_angles(arc.start(), arc.end(), samples);

    let outer = angles
        .iter()
        .map(|&angle| Point::from_polar(layout.outer_radius(), angle));
    let inner = angles
        .iter()
        .rev()
        .map(|&angle| Point::from_polar(layout.inner_radius(), angle));

    outer.chain(inner).collect()
}

/// Closed outline of a ribbon attached to the inner radius.
///
/// The outline follows the source endpoint along the circle, then a quadratic
/// Bezier curve through the center to the target endpoint. It then follows
/// the target endpoint and curves back to the start. Each of the four
/// segments uses `samples` points.
pub fn ribbon_outline(layout: &Layout, ribbon: &Ribbon, samples: usize) -> Vec<Point> {
    let radius = layout.inner_radius();
    let source = ribbon.source();
    let target = ribbon.target();
    let center = Point::default();

    let on_circle = |angle: f64| Point::from_polar(radius, angle);
    let curve = move |from: Point, to: Point| {
        // Skip t = 0: the previous segment already ended at `from`.
        sample_angles(0.0, 1.0, samples.max(2))
            .into_iter()
            .skip(1)
            .map(move |t| from.quadratic_bezier(center, to, t))
    };

    let mut points = Vec::with_capacity(samples * 4);
    points.extend(sample_angles(source.start(), source.end(), samples).into_iter().map(on_circle));
    points.extend(curve(on_circle(source.end()), on_circle(target.start())));
    points.extend(
        sample_angles(target.start(), target.end(), samples)
            .into_iter()
            .skip(1)
            .map(on_circle),
    );
    points.extend(curve(on_circle(target.end()), on_circle(source.start())));

    points
}
