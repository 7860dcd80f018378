//! Collision state components
//!
//! [`CollisionStateComponent`] mirrors the lifecycle callbacks of one
//! collider as queryable per-frame data. [`CollisionStates`] is a listener
//! that keeps one of them per collider up to date.

use std::collections::{HashMap, HashSet};

use crate::physics::{ColliderHandle, CollisionListener};

/// Tracks the current collision state of one collider
///
/// Updated every tick by [`CollisionStates`]: `colliding_with` holds every
/// collider this one currently has a record against, `collision_entered`
/// and `collision_exited` only what changed during the latest tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionStateComponent {
    /// All colliders we're currently colliding with
    pub colliding_with: HashSet<ColliderHandle>,

    /// Colliders we started colliding with this frame
    pub collision_entered: Vec<ColliderHandle>,

    /// Colliders we stopped colliding with this frame
    pub collision_exited: Vec<ColliderHandle>,
}

impl CollisionStateComponent {
    /// Check if we're currently colliding with anything
    pub fn is_colliding(&self) -> bool {
        !self.colliding_with.is_empty()
    }

    /// Check if we're colliding with a specific collider
    pub fn is_colliding_with(&self, other: ColliderHandle) -> bool {
        self.colliding_with.contains(&other)
    }

    /// Get the number of colliders we're colliding with
    pub fn collision_count(&self) -> usize {
        self.colliding_with.len()
    }

    /// Check if we just started colliding with a specific collider this frame
    pub fn just_collided_with(&self, other: ColliderHandle) -> bool {
        self.collision_entered.contains(&other)
    }

    /// Check if we just stopped colliding with a specific collider this frame
    pub fn just_stopped_colliding_with(&self, other: ColliderHandle) -> bool {
        self.collision_exited.contains(&other)
    }

    /// Clear per-frame data
    pub(crate) fn clear_frame_data(&mut self) {
        self.collision_entered.clear();
        self.collision_exited.clear();
    }
}

/// Per-collider collision state, maintained from lifecycle callbacks
#[derive(Debug, Default, Clone)]
pub struct CollisionStates {
    states: HashMap<ColliderHandle, CollisionStateComponent>,
}

impl CollisionStates {
    /// Create an empty state table
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame data; call before each tick
    pub fn begin_frame(&mut self) {
        for state in self.states.values_mut() {
            state.clear_frame_data();
        }
        self.states.retain(|_, state| state.is_colliding());
    }

    /// Get the state of a collider that is colliding or exited this frame
    pub fn get(&self, handle: ColliderHandle) -> Option<&CollisionStateComponent> {
        self.states.get(&handle)
    }

    /// Check whether a collider currently collides with anything
    pub fn is_colliding(&self, handle: ColliderHandle) -> bool {
        self.states.get(&handle).is_some_and(CollisionStateComponent::is_colliding)
    }

    /// Forget a collider (after it was unregistered)
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<CollisionStateComponent> {
        self.states.remove(&handle)
    }

    /// Forget a collider everywhere: its own state and every other
    /// collider's reference to it
    ///
    /// Used when a collider is unregistered without exit callbacks while its
    /// partners' records are dropped too.
    pub fn forget(&mut self, handle: ColliderHandle) {
        self.states.remove(&handle);
        for state in self.states.values_mut() {
            state.colliding_with.remove(&handle);
        }
    }

    /// Number of colliders with tracked state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no state is tracked
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop all tracked state
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

impl CollisionListener for CollisionStates {
    fn on_collision_enter(&mut self, this: ColliderHandle, other: ColliderHandle) {
        let state = self.states.entry(this).or_default();
        state.colliding_with.insert(other);
        state.collision_entered.push(other);
    }

    fn on_collision_stay(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.states.entry(this).or_default().colliding_with.insert(other);
    }

    fn on_collision_exit(&mut self, this: ColliderHandle, other: ColliderHandle) {
        let state = self.states.entry(this).or_default();
        state.colliding_with.remove(&other);
        state.collision_exited.push(other);
    }
}
