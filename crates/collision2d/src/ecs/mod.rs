//! Minimal entity world
//!
//! Entities are plain ids. The [`World`] owns their transforms and the
//! collision registry, and keeps both consistent when entities go away.

pub mod components;
pub mod entity;
pub mod world;

pub use components::{CollisionStateComponent, CollisionStates};
pub use entity::Entity;
pub use world::World;
