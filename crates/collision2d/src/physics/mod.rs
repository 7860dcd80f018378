//! Physics module for 2D collision detection
//!
//! Provides exact overlap tests for circles, boxes and convex polygons and a
//! registry that turns per-tick overlap results into enter/stay/exit events.
//! There is no collision response: shapes are only detected, never pushed
//! apart.

pub mod collision;
pub mod collision_system;
pub mod error;
pub mod events;

#[cfg(test)]
mod tests;

pub use collision::{
    Collider,
    ColliderShape,
    ShapeKind,
    Transform2D,
    TransformTable,
    WorldResolver,
    WorldSpaceShape,
};
pub use collision_system::{CollisionRegistry, CollisionPair, ColliderHandle, TickStats};
pub use error::CollisionError;
pub use events::{CollisionEvent, CollisionEventKind, CollisionListener};
