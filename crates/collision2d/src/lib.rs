//! # Collision2D
//!
//! 2D collision detection and collision lifecycle events for a
//! component-based game loop.
//!
//! ## Features
//!
//! - **Exact overlap tests**: circles, boxes and convex polygons via the
//!   separating axis theorem
//! - **Collision lifecycle**: enter, stay and exit callbacks per collider pair
//! - **Configurable pairing**: ordered pairs or symmetric unordered pairs
//! - **Debug outlines**: world-space outline segments coloured by state
//!
//! ## Quick Start
//!
//! ```rust
//! use collision2d::prelude::*;
//!
//! let mut world = World::new();
//! let a = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(0.0, 0.0)));
//! let b = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(1.0, 0.0)));
//! let ha = world.add_collider(Collider::circle(a, 1.0));
//! let hb = world.add_collider(Collider::rect(b, Vec2::new(0.5, 0.5)));
//!
//! let mut events = Vec::new();
//! world.tick(&mut events);
//!
//! assert_eq!(events[0], CollisionEvent::new(CollisionEventKind::Enter, ha, hb));
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod debug;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::Config,
        core::config::{CollisionConfig, PairMode, SimulationConfig},
        debug::{CollisionDebugVisualizer, DebugLine},
        ecs::{CollisionStateComponent, CollisionStates, Entity, World},
        foundation::math::{Vec2, Vec2Ext},
        physics::{
            Collider,
            ColliderHandle,
            ColliderShape,
            CollisionError,
            CollisionEvent,
            CollisionEventKind,
            CollisionListener,
            CollisionRegistry,
            Transform2D,
            TransformTable,
            WorldResolver,
        },
    };
}
