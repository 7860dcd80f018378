//! Collider shapes
//!
//! Shapes are stored in LOCAL space, attached to an owning entity, and are
//! transformed to world space on demand during collision tests using the
//! owner's world position, rotation and scale.

use serde::{Deserialize, Serialize};

use crate::ecs::Entity;
use crate::foundation::math::{Vec2, Vec2Ext};
use crate::physics::error::CollisionError;
use super::world_resolver::WorldResolver;

/// Corners of the unit square a box collider is built from (scaled by size)
const BOX_CORNERS: [[f32; 2]; 4] = [
    [-1.0, 1.0],
    [1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
];

/// Pentagon used when a polygon collider is created without points
const DEFAULT_POLYGON: [[f32; 2]; 5] = [
    [0.0, 1.0],
    [1.0, 0.0],
    [0.5, -1.0],
    [-0.5, -1.0],
    [-1.0, 0.0],
];

/// Discriminant of a [`ColliderShape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Circle
    Circle,
    /// Box (unit square scaled by size)
    Box,
    /// Convex polygon
    Polygon,
}

/// Collision shape geometry (stored in LOCAL space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// A circle; radius is scaled by the owner's dominant scale axis
    Circle {
        /// Local radius
        radius: f32,
    },
    /// A box spanning `[-size, size]` on each axis
    Box {
        /// Half-extent multiplier for the unit square
        size: Vec2,
    },
    /// A convex, consistently wound polygon
    Polygon {
        /// Local points in winding order
        points: Vec<Vec2>,
    },
}

impl ColliderShape {
    /// Get the kind of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Box { .. } => ShapeKind::Box,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Local polygon points (box corners scaled by size, or the polygon's points)
    ///
    /// Circles have no polygonal outline and return an empty list.
    pub fn local_points(&self) -> Vec<Vec2> {
        match self {
            Self::Circle { .. } => Vec::new(),
            Self::Box { size } => BOX_CORNERS
                .iter()
                .map(|&[x, y]| Vec2::new(x, y).multiply(size))
                .collect(),
            Self::Polygon { points } => points.clone(),
        }
    }

    /// Check that the geometry is usable for collision tests
    pub fn validate(&self) -> Result<(), CollisionError> {
        match self {
            Self::Circle { radius } => {
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(CollisionError::InvalidRadius(*radius));
                }
            }
            Self::Box { size } => {
                let finite = size.x.is_finite() && size.y.is_finite();
                if !finite || size.x == 0.0 || size.y == 0.0 {
                    return Err(CollisionError::InvalidSize { x: size.x, y: size.y });
                }
            }
            Self::Polygon { points } => {
                if points.len() < 3 {
                    return Err(CollisionError::DegeneratePolygon { points: points.len() });
                }
                if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                    return Err(CollisionError::NonFiniteGeometry);
                }
            }
        }
        Ok(())
    }
}

/// A collider attached to an entity
///
/// Holds a non-owning reference to its owner (the entity id), a local offset
/// and the local-space shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Entity whose world transform positions this collider
    pub owner: Entity,

    /// Local offset of the collider
    #[serde(default = "Vec2::zeros")]
    pub offset: Vec2,

    /// Local-space geometry
    pub shape: ColliderShape,
}

impl Collider {
    /// Create a collider from a shape with zero offset
    pub fn new(owner: Entity, shape: ColliderShape) -> Self {
        Self {
            owner,
            offset: Vec2::zeros(),
            shape,
        }
    }

    /// Create a circle collider
    pub fn circle(owner: Entity, radius: f32) -> Self {
        Self::new(owner, ColliderShape::Circle { radius })
    }

    /// Create a box collider; `size` multiplies the unit square `[-1, 1]²`
    pub fn rect(owner: Entity, size: Vec2) -> Self {
        Self::new(owner, ColliderShape::Box { size })
    }

    /// Create a polygon collider from convex, consistently wound local points
    pub fn polygon(owner: Entity, points: Vec<Vec2>) -> Self {
        Self::new(owner, ColliderShape::Polygon { points })
    }

    /// Create a polygon collider with the default pentagon outline
    pub fn default_polygon(owner: Entity) -> Self {
        let points = DEFAULT_POLYGON.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
        Self::polygon(owner, points)
    }

    /// Builder pattern: Set offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Get the kind of this collider's shape
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Check that the collider geometry is usable for collision tests
    pub fn validate(&self) -> Result<(), CollisionError> {
        if !self.offset.x.is_finite() || !self.offset.y.is_finite() {
            return Err(CollisionError::NonFiniteGeometry);
        }
        self.shape.validate()
    }

    /// World-space points of this collider
    ///
    /// Each local point is scaled by the owner's world scale, rotated by its
    /// world rotation, then translated by its world position plus the offset.
    /// A circle yields its world center as a single point.
    pub fn world_points<R: WorldResolver + ?Sized>(&self, resolver: &R) -> Vec<Vec2> {
        if let ColliderShape::Circle { .. } = self.shape {
            return vec![self.world_center(resolver)];
        }

        let scale = resolver.world_scale(self.owner);
        let rotation = resolver.world_rotation(self.owner);
        let translation = resolver.world_position(self.owner).add(&self.offset);

        self.shape
            .local_points()
            .iter()
            .map(|point| point.multiply(&scale).rotate(rotation).add(&translation))
            .collect()
    }

    /// World-space center of the collider
    ///
    /// For circles the offset is expressed in diameters: it is multiplied by
    /// `2 * radius` before the owner's scale and rotation are applied. Other
    /// shapes report their owner's position plus offset.
    pub fn world_center<R: WorldResolver + ?Sized>(&self, resolver: &R) -> Vec2 {
        let position = resolver.world_position(self.owner);
        match self.shape {
            ColliderShape::Circle { radius } => {
                let diameter = Vec2::new(radius * 2.0, radius * 2.0);
                self.offset
                    .multiply(&diameter)
                    .multiply(&resolver.world_scale(self.owner))
                    .rotate(resolver.world_rotation(self.owner))
                    .add(&position)
            }
            ColliderShape::Box { .. } | ColliderShape::Polygon { .. } => position.add(&self.offset),
        }
    }

    /// Radius scaled by the owner's dominant scale axis
    ///
    /// Non-uniform scale is approximated by the larger axis instead of
    /// producing an ellipse. Non-circle shapes return 0.
    pub fn effective_radius<R: WorldResolver + ?Sized>(&self, resolver: &R) -> f32 {
        match self.shape {
            ColliderShape::Circle { radius } => {
                let scale = resolver.world_scale(self.owner);
                radius * scale.x.max(scale.y)
            }
            ColliderShape::Box { .. } | ColliderShape::Polygon { .. } => 0.0,
        }
    }

    /// Transform this collider to world space for collision testing
    pub fn to_world_space<R: WorldResolver + ?Sized>(&self, resolver: &R) -> WorldSpaceShape {
        match self.shape {
            ColliderShape::Circle { .. } => WorldSpaceShape::Circle {
                center: self.world_center(resolver),
                radius: self.effective_radius(resolver),
            },
            ColliderShape::Box { .. } | ColliderShape::Polygon { .. } => WorldSpaceShape::Polygon {
                points: self.world_points(resolver),
            },
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space circle with its effective radius
    Circle {
        /// World center
        center: Vec2,
        /// Effective (scaled) radius
        radius: f32,
    },
    /// World-space polygon (boxes are polygons once transformed)
    Polygon {
        /// World points in winding order
        points: Vec<Vec2>,
    },
}
