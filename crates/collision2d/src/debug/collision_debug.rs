//! Collision-specific debug visualization
//!
//! Produces world-space outline segments for registered colliders, coloured
//! by whether they currently take part in a collision. Rendering the lines
//! is left to the caller.

use std::collections::HashSet;

use crate::foundation::math::{constants, Vec2, Vec4};
use crate::physics::collision::{Collider, WorldResolver, WorldSpaceShape};
use crate::physics::{ColliderHandle, CollisionRegistry};

/// Number of segments used to approximate a circle outline
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 180;

/// Color scheme for collision visualization
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub shape_default: Vec4,

    /// Color for collision shapes (currently colliding)
    pub shape_colliding: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vec4::new(0.0, 1.0, 0.0, 1.0),   // Green
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 1.0), // Red
        }
    }
}

/// Single world-space line segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    /// Segment start
    pub start: Vec2,
    /// Segment end
    pub end: Vec2,
    /// Line color (RGBA)
    pub color: Vec4,
}

/// Collision-specific debug visualizer
///
/// Lines accumulate until [`clear`](Self::clear) is called, typically once
/// per frame before drawing the registry again.
pub struct CollisionDebugVisualizer {
    colors: CollisionDebugColors,
    lines: Vec<DebugLine>,
    circle_segments: usize,
    enabled: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            colors: CollisionDebugColors::default(),
            lines: Vec::new(),
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            enabled: true,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set circle outline resolution (at least 3 segments)
    pub fn with_circle_segments(mut self, segments: usize) -> Self {
        self.circle_segments = segments.max(3);
        self
    }

    /// Outline one collider at its current world transform
    pub fn draw_collider<R>(&mut self, collider: &Collider, resolver: &R, is_colliding: bool)
    where
        R: WorldResolver + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let color = if is_colliding {
            self.colors.shape_colliding
        } else {
            self.colors.shape_default
        };

        let outline = match collider.to_world_space(resolver) {
            WorldSpaceShape::Circle { center, radius } => circle_outline(center, radius, self.circle_segments),
            WorldSpaceShape::Polygon { points } => points,
        };
        self.push_closed_loop(&outline, color);
    }

    /// Outline every active collider of a registry
    ///
    /// A collider counts as colliding when any collision record names it.
    pub fn draw_registry<R>(&mut self, registry: &CollisionRegistry, resolver: &R)
    where
        R: WorldResolver + ?Sized,
    {
        if !self.enabled {
            return;
        }

        let colliding: HashSet<ColliderHandle> = registry
            .records()
            .iter()
            .flat_map(|pair| [pair.first, pair.second])
            .collect();

        for (handle, collider) in registry.colliders() {
            self.draw_collider(collider, resolver, colliding.contains(&handle));
        }
    }

    fn push_closed_loop(&mut self, points: &[Vec2], color: Vec4) {
        if points.len() < 2 {
            return;
        }
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.lines.push(DebugLine { start, end, color });
        }
    }

    /// Lines drawn since the last clear
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Enable/disable the visualizer
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the visualizer is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn circle_outline(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = constants::TAU * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::physics::collision::{Transform2D, TransformTable};
    use approx::assert_relative_eq;

    #[test]
    fn test_box_outline_is_closed() {
        let mut table = TransformTable::new();
        let owner = Entity::new(1);
        table.set(owner, Transform2D::from_position(Vec2::new(2.0, 0.0)));
        let collider = Collider::rect(owner, Vec2::new(1.0, 1.0));

        let mut visualizer = CollisionDebugVisualizer::new();
        visualizer.draw_collider(&collider, &table, false);

        let lines = visualizer.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].end, lines[0].start);
        assert!(lines.iter().all(|l| l.color == CollisionDebugColors::default().shape_default));
    }

    #[test]
    fn test_circle_outline_uses_effective_radius() {
        let mut table = TransformTable::new();
        let owner = Entity::new(1);
        table.set(owner, Transform2D::identity().with_scale(Vec2::new(1.0, 3.0)));
        let collider = Collider::circle(owner, 0.5);

        let mut visualizer = CollisionDebugVisualizer::new();
        visualizer.draw_collider(&collider, &table, true);

        let lines = visualizer.lines();
        assert_eq!(lines.len(), DEFAULT_CIRCLE_SEGMENTS);
        for line in lines {
            assert_relative_eq!(line.start.norm(), 1.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_registry_colors_colliding_shapes() {
        let mut table = TransformTable::new();
        let mut registry = CollisionRegistry::new();
        for (id, x) in [(1, 0.0), (2, 1.0), (3, 10.0)] {
            let owner = Entity::new(id);
            table.set(owner, Transform2D::from_position(Vec2::new(x, 0.0)));
            registry.register(Collider::rect(owner, Vec2::new(1.0, 1.0)));
        }
        registry.update(&table, &mut ());

        let mut visualizer = CollisionDebugVisualizer::new();
        visualizer.draw_registry(&registry, &table);

        let colors = CollisionDebugColors::default();
        let red = visualizer.lines().iter().filter(|l| l.color == colors.shape_colliding).count();
        let green = visualizer.lines().iter().filter(|l| l.color == colors.shape_default).count();
        assert_eq!(red, 8);
        assert_eq!(green, 4);
    }

    #[test]
    fn test_disabled_draws_nothing() {
        let collider = Collider::circle(Entity::new(1), 1.0);
        let mut visualizer = CollisionDebugVisualizer::new().with_circle_segments(1);
        visualizer.set_enabled(false);

        visualizer.draw_collider(&collider, &TransformTable::new(), false);
        assert!(visualizer.lines().is_empty());

        visualizer.set_enabled(true);
        visualizer.draw_collider(&collider, &TransformTable::new(), false);
        assert_eq!(visualizer.lines().len(), 3);

        visualizer.clear();
        assert!(visualizer.lines().is_empty());
    }
}
