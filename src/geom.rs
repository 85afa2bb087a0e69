//! Planar primitives shared by the sweep and the region clipper
//!
//! Points are [`glam::DVec2`]. This module adds the axis-aligned bounding
//! rectangle, polygon measures and the small value types handed to callers
//! for rendering.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its minimum and maximum corners
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Corner with the smallest x and y
    pub min: DVec2,
    /// Corner with the largest x and y
    pub max: DVec2,
}

impl Rect {
    /// Create a rectangle from its origin and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            max: DVec2::new(x + width, y + height),
        }
    }

    /// Create a rectangle from two opposite corners, in any order
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check whether a point lies inside or on the border of the rectangle
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp a point into the rectangle
    #[inline]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        p.clamp(self.min, self.max)
    }

    /// The four corners, counter-clockwise starting at `min`
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Rotational direction of a polygon's vertex sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero signed area (fewer than three distinct points, or collinear)
    None,
}

/// Twice the signed area of a polygon (shoelace formula), positive when
/// counter-clockwise
pub fn signed_double_area(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let p = polygon[i];
            let q = polygon[(i + 1) % n];
            p.perp_dot(q)
        })
        .sum()
}

/// Unsigned polygon area
pub fn area(polygon: &[DVec2]) -> f64 {
    (signed_double_area(polygon) * 0.5).abs()
}

pub fn winding(polygon: &[DVec2]) -> Winding {
    let doubled = signed_double_area(polygon);
    if doubled < 0.0 {
        Winding::Clockwise
    } else if doubled > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::None
    }
}

/// Area-weighted centroid of a simple polygon
///
/// Accumulates `(p_i + p_{i+1}) * cross(p_i, p_{i+1})` over every edge including
/// the closing one, divided by six times the signed area. Returns `None` when
/// the polygon has fewer than three points or its area is too small to divide by.
pub fn centroid(polygon: &[DVec2]) -> Option<DVec2> {
    let n = polygon.len();
    if n < 3 {
        return None;
    }

    let mut signed_area = 0.0;
    let mut sum = DVec2::ZERO;
    for i in 0..n {
        let p = polygon[i];
        let q = polygon[(i + 1) % n];
        let a = p.perp_dot(q);
        signed_area += a;
        sum += (p + q) * a;
    }
    signed_area *= 0.5;

    if signed_area.abs() <= f64::EPSILON {
        return None;
    }
    Some(sum / (6.0 * signed_area))
}

/// A straight segment between two points, used for rendering output
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: DVec2,
    pub p1: DVec2,
}

impl LineSegment {
    pub fn new(p0: DVec2, p1: DVec2) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }
}

/// A circle centred on a site
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}
