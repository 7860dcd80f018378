//! Debug module for visualization and debugging tools

pub mod collision_debug;

pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer, DebugLine};
