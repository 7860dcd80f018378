//! Narrow-phase intersection tests
//!
//! Exact overlap tests for a single pair of colliders. Colliders are
//! transformed to world space first; boxes and polygons are both tested as
//! convex polygons, so the dispatch is an exhaustive match over
//! circle/polygon combinations.
//!
//! All comparisons are strict: shapes that only touch (tangent circles,
//! projection ranges sharing an endpoint) are NOT intersecting.

use crate::foundation::math::{Vec2, Vec2Ext};
use super::shape::{Collider, WorldSpaceShape};
use super::world_resolver::WorldResolver;

/// Test whether two colliders overlap in world space
pub fn intersects<R: WorldResolver + ?Sized>(a: &Collider, b: &Collider, resolver: &R) -> bool {
    let world_a = a.to_world_space(resolver);
    let world_b = b.to_world_space(resolver);
    intersects_world(&world_a, &world_b)
}

/// Test whether two world-space shapes overlap
pub fn intersects_world(a: &WorldSpaceShape, b: &WorldSpaceShape) -> bool {
    match (a, b) {
        (WorldSpaceShape::Polygon { points: a }, WorldSpaceShape::Polygon { points: b }) => {
            polygon_polygon(a, b)
        }
        (WorldSpaceShape::Polygon { points }, WorldSpaceShape::Circle { center, radius })
        | (WorldSpaceShape::Circle { center, radius }, WorldSpaceShape::Polygon { points }) => {
            polygon_circle(points, *center, *radius)
        }
        (
            WorldSpaceShape::Circle { center: center_a, radius: radius_a },
            WorldSpaceShape::Circle { center: center_b, radius: radius_b },
        ) => circle_circle(*center_a, *radius_a, *center_b, *radius_b),
    }
}

/// Separating Axis Theorem test for two convex polygons
///
/// Candidate axes are the edge perpendiculars of both polygons. The polygons
/// intersect iff their projections strictly overlap on every axis.
pub fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> bool {
    edge_axes(a)
        .chain(edge_axes(b))
        .all(|axis| {
            let (min_a, max_a) = project_points(a, &axis);
            let (min_b, max_b) = project_points(b, &axis);
            min_a < max_b && min_b < max_a
        })
}

/// Polygon against circle
///
/// Intersects when the circle center lies inside the polygon, or when the
/// closest point on any polygon edge is nearer than the radius.
pub fn polygon_circle(points: &[Vec2], center: Vec2, radius: f32) -> bool {
    if polygon_contains_point(points, center) {
        return true;
    }

    edges(points).any(|(start, end)| {
        closest_point_on_segment(start, end, center).distance(&center) < radius
    })
}

/// Circle against circle: center distance strictly below the radius sum
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(&center_b) < radius_a + radius_b
}

/// Axis-projection containment test treating the point as a degenerate shape
///
/// Uses the polygon's own edge axes only; exact for convex polygons. A point
/// on the boundary is not contained, and a polygon without any non-zero
/// edge contains nothing.
pub fn polygon_contains_point(points: &[Vec2], point: Vec2) -> bool {
    let mut axes = edge_axes(points).peekable();
    if axes.peek().is_none() {
        return false;
    }

    axes.all(|axis| {
        let (min, max) = project_points(points, &axis);
        let projection = point.scalar_projection(&axis);
        min < projection && projection < max
    })
}

/// Closest point to `point` on the segment from `start` to `end`
///
/// The normalized projection is clamped to `[0, 1]`: below 0 yields the
/// start, above 1 the end. A zero-length segment yields NaN coordinates.
pub fn closest_point_on_segment(start: Vec2, end: Vec2, point: Vec2) -> Vec2 {
    let ap = point.subtract(&start);
    let ab = end.subtract(&start);
    let t = ap.dot(&ab) / ab.magnitude_squared();

    if t < 0.0 {
        start
    } else if t > 1.0 {
        end
    } else {
        Vec2::new(start.x + ab.x * t, start.y + ab.y * t)
    }
}

/// Iterate the closed edge loop of a polygon: (p0, p1), ..., (pn-1, p0)
fn edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    points
        .iter()
        .enumerate()
        .map(move |(i, &start)| (start, points[(i + 1) % points.len()]))
}

/// Candidate separating axes, one per edge
///
/// Zero-length edges (repeated points) produce no usable axis and are skipped.
fn edge_axes(points: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    edges(points)
        .map(|(start, end)| start.axis(&end))
        .filter(|axis| *axis != Vec2::zeros())
}

/// Project a point set onto an axis, returning `[min, max]`
///
/// An empty set yields an inverted range (`+inf`, `-inf`) which never
/// overlaps anything.
fn project_points(points: &[Vec2], axis: &Vec2) -> (f32, f32) {
    let Some(first) = points.first() else {
        return (f32::INFINITY, f32::NEG_INFINITY);
    };
    let initial = first.scalar_projection(axis);
    points
        .iter()
        .fold((initial, initial), |(min, max), point| point.project(axis, min, max))
}
