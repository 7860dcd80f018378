//! 2D collision shapes and narrow-phase tests
//!
//! # Architecture
//!
//! - **Local Space Storage**: Collider shapes stored in local coordinates
//! - **On-Demand Transformation**: Shapes transformed to world space only during tests
//! - **Coordinate Decoupling**: Shape geometry separate from the owner's transform,
//!   which is looked up through [`WorldResolver`]
//!
//! # Module Organization
//!
//! - [`shape`] - Collider shapes (circle, box, polygon) and their world geometry
//! - [`narrow_phase`] - Exact intersection tests (SAT, polygon-circle, circle-circle)
//! - [`world_resolver`] - Seam to the transform layer
//!
//! # Key Types
//!
//! - [`Collider`] - Local-space shape attached to an entity
//! - [`WorldSpaceShape`] - Temporary world-space shape for collision testing

pub mod shape;
pub mod narrow_phase;
pub mod world_resolver;

// Re-export commonly used types
pub use shape::{Collider, ColliderShape, ShapeKind, WorldSpaceShape};
pub use world_resolver::{Transform2D, TransformTable, WorldResolver};
