//! World transform lookup for collider owners
//!
//! Colliders store their geometry in local space. The world-space position,
//! rotation and scale of the owning entity come from the scene/transform
//! layer, which this crate does not implement. [`WorldResolver`] is the seam
//! to that layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Source of world-space transforms for collider owners
pub trait WorldResolver {
    /// World position of the entity
    fn world_position(&self, entity: Entity) -> Vec2;

    /// World rotation of the entity in radians
    fn world_rotation(&self, entity: Entity) -> f32;

    /// World scale of the entity (per axis, may be non-uniform)
    fn world_scale(&self, entity: Entity) -> Vec2;
}

impl<R: WorldResolver + ?Sized> WorldResolver for &R {
    fn world_position(&self, entity: Entity) -> Vec2 {
        (**self).world_position(entity)
    }

    fn world_rotation(&self, entity: Entity) -> f32 {
        (**self).world_rotation(entity)
    }

    fn world_scale(&self, entity: Entity) -> Vec2 {
        (**self).world_scale(entity)
    }
}

/// Resolved 2D transform: position, rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in world space
    pub position: Vec2,

    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }
}

/// Table of resolved transforms keyed by entity
///
/// Entities without an entry resolve to the identity transform.
#[derive(Debug, Clone, Default)]
pub struct TransformTable {
    transforms: HashMap<Entity, Transform2D>,
}

impl TransformTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the transform of an entity
    pub fn set(&mut self, entity: Entity, transform: Transform2D) {
        self.transforms.insert(entity, transform);
    }

    /// Move an entity to a new world position, keeping rotation and scale
    pub fn set_position(&mut self, entity: Entity, position: Vec2) {
        self.transforms.entry(entity).or_default().position = position;
    }

    /// Get the transform of an entity, if one was set
    pub fn get(&self, entity: Entity) -> Option<&Transform2D> {
        self.transforms.get(&entity)
    }

    /// Remove the transform of an entity
    pub fn remove(&mut self, entity: Entity) -> Option<Transform2D> {
        self.transforms.remove(&entity)
    }

    fn resolve(&self, entity: Entity) -> Transform2D {
        self.transforms.get(&entity).copied().unwrap_or_default()
    }
}

impl WorldResolver for TransformTable {
    fn world_position(&self, entity: Entity) -> Vec2 {
        self.resolve(entity).position
    }

    fn world_rotation(&self, entity: Entity) -> f32 {
        self.resolve(entity).rotation
    }

    fn world_scale(&self, entity: Entity) -> Vec2 {
        self.resolve(entity).scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entity_resolves_to_identity() {
        let table = TransformTable::new();
        let entity = Entity::new(7);

        assert_eq!(table.world_position(entity), Vec2::zeros());
        assert_eq!(table.world_rotation(entity), 0.0);
        assert_eq!(table.world_scale(entity), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_set_position_keeps_rotation_and_scale() {
        let mut table = TransformTable::new();
        let entity = Entity::new(1);
        table.set(entity, Transform2D::identity().with_rotation(0.5).with_uniform_scale(2.0));

        table.set_position(entity, Vec2::new(3.0, 4.0));

        let transform = table.get(entity).copied().unwrap();
        assert_eq!(transform.position, Vec2::new(3.0, 4.0));
        assert_eq!(transform.rotation, 0.5);
        assert_eq!(transform.scale, Vec2::new(2.0, 2.0));
    }
}
