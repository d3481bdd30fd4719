//! Basic geometric types for circular layouts.
//!
//! Angles are in radians throughout. The circle is centered at the origin and
//! an angle of zero points along the positive x-axis.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

/// Represents a point in 2D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates the point at `radius` from the origin in direction `angle`
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Evaluates the quadratic Bezier curve `self -> control -> end` at `t`.
    pub fn quadratic_bezier(self, control: Point, end: Point, t: f64) -> Self {
        let u = 1.0 - t;
        self.scale(u * u)
            .add_point(control.scale(2.0 * u * t))
            .add_point(end.scale(t * t))
    }
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Returns `true` if text placed at `angle` should be flipped to stay upright.
///
/// Text along the left half of the circle reads upside down unless rotated
/// by half a turn.
pub fn is_left_half(angle: f64) -> bool {
    let angle = normalize_angle(angle);
    angle > PI / 2.0 && angle < 3.0 * PI / 2.0
}

/// Returns `count` evenly spaced angles from `start` to `end`, both inclusive.
///
/// A `count` below two yields only `start`.
pub fn sample_angles(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
