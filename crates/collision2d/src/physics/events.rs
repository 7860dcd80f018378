//! Collision lifecycle events
//!
//! Listeners are invoked synchronously during `CollisionRegistry::update`.
//! Every callback is addressed to the first collider of a pair (`this`) and
//! names the collider it is touching (`other`).

use super::collision_system::ColliderHandle;

/// Lifecycle stage of a collision pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// The pair started overlapping this tick
    Enter,
    /// The pair is overlapping this tick
    Stay,
    /// The pair stopped overlapping this tick
    Exit,
}

/// A single lifecycle notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    /// Lifecycle stage
    pub kind: CollisionEventKind,
    /// Collider receiving the notification
    pub collider: ColliderHandle,
    /// Collider it collided with
    pub other: ColliderHandle,
}

impl CollisionEvent {
    /// Create a new event
    pub fn new(kind: CollisionEventKind, collider: ColliderHandle, other: ColliderHandle) -> Self {
        Self { kind, collider, other }
    }
}

/// Receiver of collision lifecycle callbacks
///
/// All methods default to no-ops so listeners only implement what they need.
pub trait CollisionListener {
    /// `this` started overlapping `other`
    fn on_collision_enter(&mut self, _this: ColliderHandle, _other: ColliderHandle) {}

    /// `this` is still overlapping `other`
    fn on_collision_stay(&mut self, _this: ColliderHandle, _other: ColliderHandle) {}

    /// `this` stopped overlapping `other`
    fn on_collision_exit(&mut self, _this: ColliderHandle, _other: ColliderHandle) {}

    /// Dispatch an event to the matching callback
    fn on_event(&mut self, event: CollisionEvent) {
        match event.kind {
            CollisionEventKind::Enter => self.on_collision_enter(event.collider, event.other),
            CollisionEventKind::Stay => self.on_collision_stay(event.collider, event.other),
            CollisionEventKind::Exit => self.on_collision_exit(event.collider, event.other),
        }
    }
}

/// Discards all events
impl CollisionListener for () {}

/// Records events in the order they were fired
impl CollisionListener for Vec<CollisionEvent> {
    fn on_collision_enter(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.push(CollisionEvent::new(CollisionEventKind::Enter, this, other));
    }

    fn on_collision_stay(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.push(CollisionEvent::new(CollisionEventKind::Stay, this, other));
    }

    fn on_collision_exit(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.push(CollisionEvent::new(CollisionEventKind::Exit, this, other));
    }
}

impl<L: CollisionListener + ?Sized> CollisionListener for &mut L {
    fn on_collision_enter(&mut self, this: ColliderHandle, other: ColliderHandle) {
        (**self).on_collision_enter(this, other);
    }

    fn on_collision_stay(&mut self, this: ColliderHandle, other: ColliderHandle) {
        (**self).on_collision_stay(this, other);
    }

    fn on_collision_exit(&mut self, this: ColliderHandle, other: ColliderHandle) {
        (**self).on_collision_exit(this, other);
    }
}

/// Forwards every event to both listeners, first `A` then `B`
impl<A: CollisionListener, B: CollisionListener> CollisionListener for (A, B) {
    fn on_collision_enter(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.0.on_collision_enter(this, other);
        self.1.on_collision_enter(this, other);
    }

    fn on_collision_stay(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.0.on_collision_stay(this, other);
        self.1.on_collision_stay(this, other);
    }

    fn on_collision_exit(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.0.on_collision_exit(this, other);
        self.1.on_collision_exit(this, other);
    }
}
