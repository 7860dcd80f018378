//! Collision error types
//!
//! The per-tick lifecycle never fails. These errors are only produced at the
//! validating boundaries (`ColliderShape::validate`, `Collider::validate`,
//! `CollisionRegistry::try_register`) so that degenerate geometry can be
//! caught before it silently produces NaN projections.

use thiserror::Error;

use super::collision_system::ColliderHandle;

/// Collision subsystem errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Circle radius is zero, negative or not finite
    #[error("Invalid circle radius: {0}")]
    InvalidRadius(f32),

    /// Polygon has fewer than three points
    #[error("Degenerate polygon: {points} points (at least 3 required)")]
    DegeneratePolygon {
        /// Number of points the polygon actually has
        points: usize,
    },

    /// Box size has a zero or non-finite component
    #[error("Invalid box size: ({x}, {y})")]
    InvalidSize {
        /// Size along X
        x: f32,
        /// Size along Y
        y: f32,
    },

    /// Collider offset or a polygon point is not finite
    #[error("Non-finite collider geometry")]
    NonFiniteGeometry,

    /// Handle does not refer to a registered collider
    #[error("Unknown collider: {0:?}")]
    UnknownCollider(ColliderHandle),
}
