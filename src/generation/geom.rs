//! Plane-geometry primitives for the frontier engine and loop closer

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Outcome of solving for a tangent disk position on a frontier edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TangentSolution {
    /// The first intersection of the grown circles, on the frontier side
    Point(Vec2),
    /// The grown circles do not reach each other: the endpoints are too far
    /// apart for this radius. A larger draw may still fit.
    OutOfReach,
    /// The endpoint centers coincide; the edge has no direction to solve in
    Degenerate,
}

/// Position for a new disk of `radius` tangent to both endpoint disks
///
/// Grows both disks by `radius` and intersects the resulting circles; of the
/// two intersection points the first solution is returned, which by
/// convention lies on the side of a->b that the frontier keeps its triangles
/// on.
pub(crate) fn outward_tangent_point(
    a: Vec2,
    a_radius: f32,
    b: Vec2,
    b_radius: f32,
    radius: f32,
) -> TangentSolution {
    let delta = b - a;
    let d2 = delta.length_squared();
    if d2 == 0.0 {
        return TangentSolution::Degenerate;
    }

    let r1 = a_radius + radius;
    let r2 = b_radius + radius;

    // Circle-circle intersection, see https://math.stackexchange.com/a/1367732
    let k = (r1 * r1 - r2 * r2) / d2;
    let base = (a + b) * 0.5 + delta * (k * 0.5);
    let disc = 2.0 * (r1 * r1 + r2 * r2) / d2 - k * k - 1.0;
    if disc < 0.0 || !disc.is_finite() {
        return TangentSolution::OutOfReach;
    }
    let h = disc.sqrt() * 0.5;

    TangentSolution::Point(Vec2::new(base.x + h * delta.y, base.y - h * delta.x))
}

/// Direction angle of the vector from `from` to `to`, in radians
#[inline]
pub(crate) fn direction_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Wrap an angle into (-PI, PI]
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Signed turn from one direction angle to the next, in (-PI, PI]
#[inline]
pub(crate) fn turn_angle(prev: f32, next: f32) -> f32 {
    wrap_angle(next - prev)
}

/// Check whether a point lies inside the half-open canvas rectangle
#[inline]
pub(crate) fn in_canvas(width: f32, height: f32, p: Vec2) -> bool {
    0.0 <= p.x && p.x < width && 0.0 <= p.y && p.y < height
}
