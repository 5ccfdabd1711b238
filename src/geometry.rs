//! Pure geometry helpers for drafting and hit testing.
//!
//! All functions work in data space. Hit tests take a [`HitTolerance`] so a
//! pixel radius can be expressed on two axes with very different units
//! (sample index vs. price).

use crate::constants::{DEGENERATE_SEGMENT_EPSILON, VERTICAL_EDGE_EPSILON};
use crate::types::DataPoint;

/// Slope of the line through `a` and `b`, or `None` when the line is vertical.
pub fn slope(a: DataPoint, b: DataPoint) -> Option<f64> {
    let dx = b.x - a.x;
    if dx.abs() < VERTICAL_EDGE_EPSILON {
        return None;
    }
    Some((b.y - a.y) / dx)
}

/// Y intercept of the line with slope `m` passing through `p`.
#[inline]
pub fn y_intercept(m: f64, p: DataPoint) -> f64 {
    p.y - m * p.x
}

/// Y of the line through `a` and `b` at `x`.
pub fn line_y_at(a: DataPoint, b: DataPoint, x: f64) -> Option<f64> {
    let m = slope(a, b)?;
    Some(m * x + y_intercept(m, b))
}

/// Vertical displacement of `p` from the line through `a` and `b`.
///
/// Positive when `p` lies above the line. `None` for a vertical line, where
/// a vertical displacement is meaningless.
pub fn signed_offset(a: DataPoint, b: DataPoint, p: DataPoint) -> Option<f64> {
    line_y_at(a, b, p.x).map(|y| p.y - y)
}

/// Per-axis hit radius in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTolerance {
    pub x: f64,
    pub y: f64,
}

impl HitTolerance {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same radius on both axes.
    pub fn uniform(r: f64) -> Self {
        Self { x: r, y: r }
    }

    /// Map a point into the space where the tolerance is a unit circle.
    #[inline]
    fn normalize(&self, p: DataPoint) -> DataPoint {
        DataPoint::new(p.x / self.x, p.y / self.y)
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: DataPoint, a: DataPoint, b: DataPoint) -> f64 {
    let (vx, vy) = (b.x - a.x, b.y - a.y);
    let len_sq = vx * vx + vy * vy;

    if len_sq < DEGENERATE_SEGMENT_EPSILON {
        return distance(p, a);
    }

    // Project onto the line, clamped to the segment
    let t = (((p.x - a.x) * vx + (p.y - a.y) * vy) / len_sq).clamp(0.0, 1.0);
    distance(p, DataPoint::new(a.x + vx * t, a.y + vy * t))
}

#[inline]
pub fn distance(a: DataPoint, b: DataPoint) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `p` is within `tol` of the point `q`.
pub fn near_point(p: DataPoint, q: DataPoint, tol: HitTolerance) -> bool {
    distance(tol.normalize(p), tol.normalize(q)) <= 1.0
}

/// Whether `p` is within `tol` of the segment `a`-`b`.
pub fn near_segment(p: DataPoint, a: DataPoint, b: DataPoint, tol: HitTolerance) -> bool {
    distance_to_segment(tol.normalize(p), tol.normalize(a), tol.normalize(b)) <= 1.0
}

#[inline]
fn cross(o: DataPoint, a: DataPoint, b: DataPoint) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Whether `p` lies inside the convex quadrilateral `corners` (either winding).
///
/// A quad with zero area contains nothing.
pub fn point_in_quad(p: DataPoint, corners: &[DataPoint; 4]) -> bool {
    let mut sign = 0.0_f64;
    for i in 0..4 {
        let c = cross(corners[i], corners[(i + 1) % 4], p);
        if c == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = c.signum();
        } else if c.signum() != sign {
            return false;
        }
    }
    // All-zero crosses means a degenerate quad
    sign != 0.0
}
