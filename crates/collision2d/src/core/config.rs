//! # Collision Configuration
//!
//! Concrete configuration structures for the collision subsystem and the
//! simulation loop that drives it. All structures load from TOML or RON via
//! the [`Config`] trait.
//!
//! The defaults reproduce the established collision lifecycle exactly:
//! ordered pairs, and stay fired on the same tick as enter.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::physics::collision::Collider;

/// How collision pairs are identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairMode {
    /// `(a, b)` and `(b, a)` are tested and recorded separately, and
    /// unregistering a collider only drops records where it comes first
    #[default]
    Ordered,
    /// Each pair is tested once, both colliders are notified from that one
    /// result, and unregistering drops records in either role
    Unordered,
}

/// # Collision Configuration
///
/// Lifecycle behavior of a `CollisionRegistry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Pair identity and cleanup mode
    pub pair_mode: PairMode,

    /// Fire stay on the same tick a pair enters
    ///
    /// When `false`, a newly entered pair receives only enter on its first
    /// tick and stay from the next tick on.
    pub stay_on_enter_tick: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            pair_mode: PairMode::Ordered,
            stay_on_enter_tick: true,
        }
    }
}

impl CollisionConfig {
    /// Builder pattern: Set pair mode
    pub fn with_pair_mode(mut self, pair_mode: PairMode) -> Self {
        self.pair_mode = pair_mode;
        self
    }

    /// Builder pattern: Set whether stay fires on the enter tick
    pub fn with_stay_on_enter_tick(mut self, enabled: bool) -> Self {
        self.stay_on_enter_tick = enabled;
        self
    }

    /// Symmetric pairs and enter-only first ticks
    pub fn redesigned() -> Self {
        Self {
            pair_mode: PairMode::Unordered,
            stay_on_enter_tick: false,
        }
    }
}

impl Config for CollisionConfig {}

/// # Simulation Configuration
///
/// Top-level settings for a simulation world: logging, collision behavior,
/// fixed tick rate, and an optional list of colliders to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Log filter passed to the logger (e.g. "info", "collision2d=trace")
    pub log_level: String,

    /// Collision lifecycle behavior
    pub collision: CollisionConfig,

    /// Ticks per second of the simulation loop
    pub tick_rate: f32,

    /// Colliders to register at startup
    pub colliders: Vec<Collider>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            collision: CollisionConfig::default(),
            tick_rate: 60.0,
            colliders: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Builder pattern: Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder pattern: Set collision configuration
    pub fn with_collision(mut self, collision: CollisionConfig) -> Self {
        self.collision = collision;
        self
    }

    /// Builder pattern: Set tick rate
    pub fn with_tick_rate(mut self, tick_rate: f32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Fixed time step in seconds
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }

        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!("Tick rate must be positive, got {}", self.tick_rate)));
        }

        for collider in &self.colliders {
            if collider.owner.id() == u32::MAX {
                return Err(ConfigError::Invalid(format!("Entity id {} is reserved", u32::MAX)));
            }
            collider
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("Collider for entity {}: {}", collider.owner.id(), e)))?;
        }

        Ok(())
    }
}

impl Config for SimulationConfig {}
