//! Point and tangent evaluation on line, quadratic and cubic segments.
//!
//! Tangents are unit length. A zero-length derivative (coincident control points) falls back to
//! `(1, 0)` so callers never divide by zero.

use crate::foundation::core::{Point, Vec2};

const FALLBACK_TANGENT: Vec2 = Vec2::new(1.0, 0.0);

fn unit_or_fallback(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > f64::EPSILON && len.is_finite() {
        v / len
    } else {
        FALLBACK_TANGENT
    }
}

/// Point on the segment `p0 -> p1` at `t`.
pub fn line_point(p0: Point, p1: Point, t: f64) -> Point {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p1;
    }
    p0.lerp(p1, t)
}

/// Unit direction of the segment `p0 -> p1`.
pub fn line_tangent(p0: Point, p1: Point) -> Vec2 {
    unit_or_fallback(p1 - p0)
}

/// Point on the quadratic Bezier `p0, p1, p2` at `t`.
pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p2;
    }
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Unit tangent of the quadratic Bezier at `t`: `2(1-t)(p1-p0) + 2t(p2-p1)`, normalized.
pub fn quad_tangent(p0: Point, p1: Point, p2: Point, t: f64) -> Vec2 {
    let d = (p1 - p0) * (2.0 * (1.0 - t)) + (p2 - p1) * (2.0 * t);
    unit_or_fallback(d)
}

/// Point on the cubic Bezier `p0, p1, p2, p3` at `t`.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p3;
    }
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Unit tangent of the cubic Bezier at `t`.
pub fn cubic_tangent(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Vec2 {
    let mt = 1.0 - t;
    let d = (p1 - p0) * (3.0 * mt * mt) + (p2 - p1) * (6.0 * mt * t) + (p3 - p2) * (3.0 * t * t);
    unit_or_fallback(d)
}

/// Tangent rotated +90°: `(x, y) -> (-y, x)`.
pub fn normal(tangent: Vec2) -> Vec2 {
    Vec2::new(-tangent.y, tangent.x)
}

#[cfg(test)]
#[path = "../../tests/unit/path/sample.rs"]
mod tests;
