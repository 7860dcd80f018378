//! Collision registry: broad phase and collision lifecycle
//!
//! The registry owns every active collider, scans all candidate pairs once
//! per tick (broad phase: every pair except self and same-owner pairs), asks
//! the narrow phase whether they overlap, and folds the result into a
//! per-pair lifecycle:
//!
//! | record exists | intersecting | action                         |
//! |---------------|--------------|--------------------------------|
//! | no            | yes          | create record, fire enter      |
//! | yes           | yes          | nothing                        |
//! | yes           | no           | remove record, fire exit       |
//! | no            | no           | nothing                        |
//!
//! After the scan, stay fires once per stored record, in record creation
//! order. With the default configuration this includes records created in
//! the same tick, so a new pair receives both enter and stay on its first
//! overlapping tick.
//!
//! The registry is a plain value: each world owns its own instance.

use std::collections::HashSet;

use log::{debug, trace, warn};
use slotmap::SlotMap;

use crate::core::config::{CollisionConfig, PairMode};
use crate::ecs::Entity;
use crate::physics::collision::{narrow_phase, Collider, WorldResolver};
use crate::physics::error::CollisionError;
use crate::physics::events::CollisionListener;

slotmap::new_key_type! {
    /// Stable handle of a registered collider
    pub struct ColliderHandle;
}

/// Pair of colliders known to overlap
///
/// In ordered mode `(a, b)` and `(b, a)` are different pairs. In unordered
/// mode `first` is the collider registered earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Collider receiving the callbacks (ordered mode)
    pub first: ColliderHandle,
    /// The collider it overlaps
    pub second: ColliderHandle,
}

impl CollisionPair {
    /// Create a new pair
    pub fn new(first: ColliderHandle, second: ColliderHandle) -> Self {
        Self { first, second }
    }

    /// Check whether the collider participates in this pair
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        self.first == handle || self.second == handle
    }

    /// The same pair with participants swapped
    pub fn reversed(&self) -> Self {
        Self::new(self.second, self.first)
    }
}

/// Counters for the most recent `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Narrow-phase tests performed
    pub pairs_tested: usize,
    /// Enter callbacks fired
    pub entered: usize,
    /// Stay callbacks fired
    pub stayed: usize,
    /// Exit callbacks fired
    pub exited: usize,
}

/// Registry of active colliders and their collision records
pub struct CollisionRegistry {
    /// Collider storage
    colliders: SlotMap<ColliderHandle, Collider>,

    /// Active colliders in registration order
    active: Vec<ColliderHandle>,

    /// Collision records in creation order
    records: Vec<CollisionPair>,

    /// Lookup set mirroring `records`
    record_set: HashSet<CollisionPair>,

    config: CollisionConfig,

    last_stats: TickStats,
}

impl CollisionRegistry {
    /// Create an empty registry with the default (compatible) configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty registry with the given configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            active: Vec::new(),
            records: Vec::new(),
            record_set: HashSet::new(),
            config,
            last_stats: TickStats::default(),
        }
    }

    /// Get the configuration this registry runs with
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Register a collider and append it to the active set
    ///
    /// Geometry is not rejected here; degenerate shapes are logged and then
    /// produce degenerate (never panicking) test results. Use
    /// [`try_register`](Self::try_register) to reject them instead.
    pub fn register(&mut self, collider: Collider) -> ColliderHandle {
        if let Err(err) = collider.validate() {
            warn!("Registering collider for entity {} with invalid geometry: {}", collider.owner.id(), err);
        }

        let owner = collider.owner;
        let kind = collider.kind();
        let handle = self.colliders.insert(collider);
        self.active.push(handle);

        debug!("Registered {:?} collider {:?} for entity {}", kind, handle, owner.id());
        handle
    }

    /// Validate a collider, then register it
    pub fn try_register(&mut self, collider: Collider) -> Result<ColliderHandle, CollisionError> {
        collider.validate()?;
        Ok(self.register(collider))
    }

    /// Unregister a collider
    ///
    /// Removes the collider from the active set and drops every record in
    /// which it is the first participant. In ordered mode records where it is
    /// only the second participant are kept; their first participant keeps
    /// receiving stay for them. In unordered mode both roles are cleaned up.
    /// No exit callbacks fire. Returns `false` if the handle was not registered.
    pub fn unregister(&mut self, handle: ColliderHandle) -> bool {
        if self.colliders.remove(handle).is_none() {
            debug!("Ignoring unregister of unknown collider {:?}", handle);
            return false;
        }

        self.active.retain(|&active| active != handle);

        let symmetric = self.config.pair_mode == PairMode::Unordered;
        let before = self.records.len();
        self.records.retain(|pair| {
            pair.first != handle && !(symmetric && pair.second == handle)
        });
        self.record_set.retain(|pair| {
            pair.first != handle && !(symmetric && pair.second == handle)
        });

        debug!(
            "Unregistered collider {:?} ({} records dropped)",
            handle,
            before - self.records.len()
        );
        true
    }

    /// Run one collision tick
    ///
    /// Pairs are scanned in registration order (outer loop first participant,
    /// inner loop second participant); enter and exit fire during the scan,
    /// stay fires afterwards in record creation order.
    pub fn update<R, L>(&mut self, resolver: &R, listener: &mut L) -> TickStats
    where
        R: WorldResolver + ?Sized,
        L: CollisionListener + ?Sized,
    {
        let mut stats = TickStats::default();
        let mut entered_this_tick = HashSet::new();

        match self.config.pair_mode {
            PairMode::Ordered => self.scan_ordered(resolver, listener, &mut stats, &mut entered_this_tick),
            PairMode::Unordered => self.scan_unordered(resolver, listener, &mut stats, &mut entered_this_tick),
        }

        let symmetric = self.config.pair_mode == PairMode::Unordered;
        for pair in &self.records {
            if !self.config.stay_on_enter_tick && entered_this_tick.contains(pair) {
                continue;
            }
            listener.on_collision_stay(pair.first, pair.second);
            stats.stayed += 1;
            if symmetric {
                listener.on_collision_stay(pair.second, pair.first);
                stats.stayed += 1;
            }
        }

        trace!(
            "Collision tick: {} colliders, {} tests, {} enter, {} stay, {} exit",
            self.active.len(),
            stats.pairs_tested,
            stats.entered,
            stats.stayed,
            stats.exited
        );
        self.last_stats = stats;
        stats
    }

    /// Every ordered pair is tested independently
    fn scan_ordered<R, L>(
        &mut self,
        resolver: &R,
        listener: &mut L,
        stats: &mut TickStats,
        entered_this_tick: &mut HashSet<CollisionPair>,
    ) where
        R: WorldResolver + ?Sized,
        L: CollisionListener + ?Sized,
    {
        for i in 0..self.active.len() {
            for j in 0..self.active.len() {
                let pair = CollisionPair::new(self.active[i], self.active[j]);
                let Some(hit) = self.test_candidate(pair, resolver) else {
                    continue;
                };
                stats.pairs_tested += 1;

                if self.apply_transition(pair, hit, stats, entered_this_tick) {
                    if hit {
                        listener.on_collision_enter(pair.first, pair.second);
                    } else {
                        listener.on_collision_exit(pair.first, pair.second);
                    }
                }
            }
        }
    }

    /// Each unordered pair is tested once and both sides are notified
    fn scan_unordered<R, L>(
        &mut self,
        resolver: &R,
        listener: &mut L,
        stats: &mut TickStats,
        entered_this_tick: &mut HashSet<CollisionPair>,
    ) where
        R: WorldResolver + ?Sized,
        L: CollisionListener + ?Sized,
    {
        for i in 0..self.active.len() {
            for j in (i + 1)..self.active.len() {
                let pair = CollisionPair::new(self.active[i], self.active[j]);
                let Some(hit) = self.test_candidate(pair, resolver) else {
                    continue;
                };
                stats.pairs_tested += 1;

                if self.apply_transition(pair, hit, stats, entered_this_tick) {
                    if hit {
                        listener.on_collision_enter(pair.first, pair.second);
                        listener.on_collision_enter(pair.second, pair.first);
                        stats.entered += 1;
                    } else {
                        listener.on_collision_exit(pair.first, pair.second);
                        listener.on_collision_exit(pair.second, pair.first);
                        stats.exited += 1;
                    }
                }
            }
        }
    }

    /// Broad-phase filter plus narrow-phase test
    ///
    /// Returns `None` for pairs that are never tested (self and same-owner).
    fn test_candidate<R>(&self, pair: CollisionPair, resolver: &R) -> Option<bool>
    where
        R: WorldResolver + ?Sized,
    {
        if pair.first == pair.second {
            return None;
        }
        let a = self.colliders.get(pair.first)?;
        let b = self.colliders.get(pair.second)?;
        if a.owner == b.owner {
            return None;
        }
        Some(narrow_phase::intersects(a, b, resolver))
    }

    /// Fold one test result into the pair's record
    ///
    /// Returns `true` when the pair changed state (enter or exit must fire).
    fn apply_transition(
        &mut self,
        pair: CollisionPair,
        hit: bool,
        stats: &mut TickStats,
        entered_this_tick: &mut HashSet<CollisionPair>,
    ) -> bool {
        let recorded = self.record_set.contains(&pair);
        match (recorded, hit) {
            (false, true) => {
                self.records.push(pair);
                self.record_set.insert(pair);
                entered_this_tick.insert(pair);
                stats.entered += 1;
                trace!("Collision enter: {:?} -> {:?}", pair.first, pair.second);
                true
            }
            (true, false) => {
                self.records.retain(|record| *record != pair);
                self.record_set.remove(&pair);
                stats.exited += 1;
                trace!("Collision exit: {:?} -> {:?}", pair.first, pair.second);
                true
            }
            (true, true) | (false, false) => false,
        }
    }

    /// Run the narrow phase for two registered colliders
    ///
    /// Ignores the broad-phase filters: colliders sharing an owner can be
    /// tested here.
    pub fn intersects<R>(&self, a: ColliderHandle, b: ColliderHandle, resolver: &R) -> Result<bool, CollisionError>
    where
        R: WorldResolver + ?Sized,
    {
        let collider_a = self.colliders.get(a).ok_or(CollisionError::UnknownCollider(a))?;
        let collider_b = self.colliders.get(b).ok_or(CollisionError::UnknownCollider(b))?;
        Ok(narrow_phase::intersects(collider_a, collider_b, resolver))
    }

    /// Check whether a record exists for the pair
    ///
    /// In unordered mode either orientation matches.
    pub fn is_colliding(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        let pair = CollisionPair::new(a, b);
        self.record_set.contains(&pair)
            || (self.config.pair_mode == PairMode::Unordered && self.record_set.contains(&pair.reversed()))
    }

    /// Get a registered collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Get a registered collider for modification (offset, size, radius, points)
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Check if a handle is registered
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains_key(handle)
    }

    /// Active colliders in registration order
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> + '_ {
        self.active
            .iter()
            .filter_map(move |&handle| self.colliders.get(handle).map(|collider| (handle, collider)))
    }

    /// Handles of all colliders owned by an entity
    pub fn colliders_of(&self, owner: Entity) -> Vec<ColliderHandle> {
        self.colliders()
            .filter(|(_, collider)| collider.owner == owner)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Current collision records in creation order
    pub fn records(&self) -> &[CollisionPair] {
        &self.records
    }

    /// Number of collision records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if no collider is registered
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Counters of the most recent update
    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Remove all colliders and records without firing callbacks
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.active.clear();
        self.records.clear();
        self.record_set.clear();
        self.last_stats = TickStats::default();
    }
}

impl Default for CollisionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
