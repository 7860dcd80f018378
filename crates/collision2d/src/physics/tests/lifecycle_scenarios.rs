//! Enter/stay/exit sequences for the default (ordered pair) lifecycle

use crate::core::config::CollisionConfig;
use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use crate::physics::collision::{Collider, Transform2D, TransformTable};
use crate::physics::collision_system::{ColliderHandle, CollisionRegistry};
use crate::physics::events::{CollisionEvent, CollisionEventKind};

use CollisionEventKind::{Enter, Exit, Stay};

struct Scene {
    registry: CollisionRegistry,
    transforms: TransformTable,
}

impl Scene {
    fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    fn with_config(config: CollisionConfig) -> Self {
        Self {
            registry: CollisionRegistry::with_config(config),
            transforms: TransformTable::new(),
        }
    }

    fn spawn(&mut self, id: u32, position: Vec2, make: impl FnOnce(Entity) -> Collider) -> (Entity, ColliderHandle) {
        let entity = Entity::new(id);
        self.transforms.set(entity, Transform2D::from_position(position));
        (entity, self.registry.register(make(entity)))
    }

    fn tick(&mut self) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        self.registry.update(&self.transforms, &mut events);
        events
    }
}

fn event(kind: CollisionEventKind, collider: ColliderHandle, other: ColliderHandle) -> CollisionEvent {
    CollisionEvent::new(kind, collider, other)
}

fn received_by(events: &[CollisionEvent], collider: ColliderHandle) -> Vec<CollisionEventKind> {
    events
        .iter()
        .filter(|e| e.collider == collider)
        .map(|e| e.kind)
        .collect()
}

#[test]
fn test_overlapping_circles_enter_and_stay_on_first_tick() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));

    let first = scene.tick();
    assert_eq!(
        first,
        vec![
            event(Enter, a, b),
            event(Enter, b, a),
            event(Stay, a, b),
            event(Stay, b, a),
        ]
    );

    for _ in 0..3 {
        assert_eq!(scene.tick(), vec![event(Stay, a, b), event(Stay, b, a)]);
    }
}

#[test]
fn test_separated_circles_never_fire() {
    let mut scene = Scene::new();
    scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.spawn(2, Vec2::new(3.0, 0.0), |e| Collider::circle(e, 1.0));

    for _ in 0..3 {
        assert!(scene.tick().is_empty());
    }
    assert_eq!(scene.registry.record_count(), 0);
}

#[test]
fn test_touching_boxes_never_fire() {
    let mut scene = Scene::new();
    scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::rect(e, Vec2::new(1.0, 1.0)));
    scene.spawn(2, Vec2::new(2.0, 0.0), |e| Collider::rect(e, Vec2::new(1.0, 1.0)));

    assert!(scene.tick().is_empty());
}

#[test]
fn test_box_moving_through_box() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::rect(e, Vec2::new(1.0, 1.0)));
    let (mover, b) = scene.spawn(2, Vec2::new(5.0, 0.0), |e| Collider::rect(e, Vec2::new(1.0, 1.0)));

    let path = [5.0, 1.5, 1.0, 0.5, 5.0, 6.0];
    let mut per_tick = Vec::new();
    for x in path {
        scene.transforms.set_position(mover, Vec2::new(x, 0.0));
        per_tick.push(received_by(&scene.tick(), a));
    }

    assert_eq!(
        per_tick,
        vec![
            vec![],
            vec![Enter, Stay],
            vec![Stay],
            vec![Stay],
            vec![Exit],
            vec![],
        ]
    );

    // The mover sees the mirrored sequence through its own ordered pair
    scene.transforms.set_position(mover, Vec2::new(1.5, 0.0));
    assert_eq!(received_by(&scene.tick(), b), vec![Enter, Stay]);
}

#[test]
fn test_exit_fires_during_scan_before_stays() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));
    let (leaver, c) = scene.spawn(3, Vec2::new(-1.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.tick();

    scene.transforms.set_position(leaver, Vec2::new(-10.0, 0.0));
    let events = scene.tick();

    assert_eq!(
        events,
        vec![
            event(Exit, a, c),
            event(Exit, c, a),
            event(Stay, a, b),
            event(Stay, b, a),
        ]
    );
}

#[test]
fn test_simultaneous_enters_follow_registration_order() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(0.5, 0.0), |e| Collider::circle(e, 1.0));
    let (_, c) = scene.spawn(3, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));

    let enters: Vec<_> = scene
        .tick()
        .into_iter()
        .filter(|e| e.kind == Enter)
        .map(|e| (e.collider, e.other))
        .collect();

    assert_eq!(enters, vec![(a, b), (a, c), (b, a), (b, c), (c, a), (c, b)]);
}

#[test]
fn test_unregistered_collider_receives_no_more_callbacks() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.tick();

    assert!(scene.registry.unregister(a));
    assert!(!scene.registry.is_colliding(a, b));

    for _ in 0..3 {
        let events = scene.tick();
        assert!(received_by(&events, a).is_empty());
    }
}

#[test]
fn test_unregister_keeps_records_where_collider_is_second() {
    let mut scene = Scene::new();
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.tick();

    scene.registry.unregister(a);

    // (b, a) is never tested again, so its record stays and keeps firing stay
    assert!(scene.registry.is_colliding(b, a));
    assert_eq!(scene.tick(), vec![event(Stay, b, a)]);
    assert_eq!(scene.tick(), vec![event(Stay, b, a)]);
}

#[test]
fn test_other_colliders_of_unregistered_owner_keep_working() {
    let mut scene = Scene::new();
    let (owner, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let extra = scene.registry.register(Collider::rect(owner, Vec2::new(1.0, 1.0)));
    let (_, b) = scene.spawn(2, Vec2::new(1.5, 0.0), |e| Collider::circle(e, 1.0));
    scene.tick();

    scene.registry.unregister(a);
    let events = scene.tick();

    assert_eq!(received_by(&events, extra), vec![Stay]);
    assert!(scene.registry.is_colliding(extra, b));
}

#[test]
fn test_enter_only_first_tick_when_configured() {
    let config = CollisionConfig::default().with_stay_on_enter_tick(false);
    let mut scene = Scene::with_config(config);
    let (_, a) = scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    let (_, b) = scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));

    assert_eq!(scene.tick(), vec![event(Enter, a, b), event(Enter, b, a)]);
    assert_eq!(scene.tick(), vec![event(Stay, a, b), event(Stay, b, a)]);
}

#[test]
fn test_polygon_and_circle_lifecycle() {
    let mut scene = Scene::new();
    let (_, poly) = scene.spawn(1, Vec2::new(0.0, 0.0), Collider::default_polygon);
    let (ball, circle) = scene.spawn(2, Vec2::new(0.0, 3.0), |e| Collider::circle(e, 1.0));

    assert!(scene.tick().is_empty());

    // Pentagon tip is at (0, 1); a unit circle at y = 1.5 overlaps it
    scene.transforms.set_position(ball, Vec2::new(0.0, 1.5));
    assert_eq!(received_by(&scene.tick(), poly), vec![Enter, Stay]);
    assert!(scene.registry.is_colliding(circle, poly));
}

#[test]
fn test_stats_count_callbacks() {
    let mut scene = Scene::new();
    scene.spawn(1, Vec2::new(0.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.spawn(2, Vec2::new(1.0, 0.0), |e| Collider::circle(e, 1.0));
    scene.spawn(3, Vec2::new(10.0, 0.0), |e| Collider::circle(e, 1.0));

    scene.tick();
    let stats = scene.registry.last_stats();

    assert_eq!(stats.pairs_tested, 6);
    assert_eq!(stats.entered, 2);
    assert_eq!(stats.stayed, 2);
    assert_eq!(stats.exited, 0);
}
