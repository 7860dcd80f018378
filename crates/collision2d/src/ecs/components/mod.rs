//! ECS Components module
//!
//! Per-entity data maintained by the world alongside the collision registry.

pub mod collision;

pub use collision::{CollisionStateComponent, CollisionStates};
