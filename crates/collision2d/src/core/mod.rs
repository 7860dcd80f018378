//! # Core Module
//!
//! Shared configuration used throughout the crate.
//!
//! ## Organization
//!
//! - **Config**: Collision and simulation configuration structures

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    CollisionConfig,
    PairMode,
    SimulationConfig,
    Config,
    ConfigError,
};
