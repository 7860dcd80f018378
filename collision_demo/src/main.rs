//! Collision Lifecycle Demo
//!
//! Runs a headless scene for a fixed number of ticks:
//! - A box sweeps across the arena from left to right
//! - Circles drift around and bounce off the arena walls
//! - A rotating pentagon sits in the middle
//!
//! Enter and exit events are logged as they happen; stay events at trace
//! level. Pass a `.toml` or `.ron` simulation config as the first argument to
//! change the collision mode or add static colliders.

use std::collections::HashMap;

use collision2d::foundation::logging;
use collision2d::prelude::*;
use log::{debug, info, trace};
use rand::Rng;

// Arena bounds: -ARENA_HALF_SIZE to +ARENA_HALF_SIZE on both axes
const ARENA_HALF_SIZE: f32 = 20.0;

const NUM_CIRCLES: usize = 12;
const CIRCLE_SPEED: f32 = 6.0;
const SWEEPER_SPEED: f32 = 8.0;
const PENTAGON_SPIN: f32 = 0.5; // radians per second
const DEFAULT_TICKS: u32 = 600;

struct Mover {
    entity: Entity,
    velocity: Vec2,
}

/// Logs lifecycle callbacks with readable collider names
struct EventLog {
    names: HashMap<ColliderHandle, String>,
    tick: u32,
    enters: usize,
    exits: usize,
}

impl EventLog {
    fn name(&self, handle: ColliderHandle) -> &str {
        self.names.get(&handle).map_or("<removed>", String::as_str)
    }
}

impl CollisionListener for EventLog {
    fn on_collision_enter(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.enters += 1;
        info!("[tick {:>4}] {} entered {}", self.tick, self.name(this), self.name(other));
    }

    fn on_collision_stay(&mut self, this: ColliderHandle, other: ColliderHandle) {
        trace!("[tick {:>4}] {} stays in {}", self.tick, self.name(this), self.name(other));
    }

    fn on_collision_exit(&mut self, this: ColliderHandle, other: ColliderHandle) {
        self.exits += 1;
        info!("[tick {:>4}] {} exited {}", self.tick, self.name(this), self.name(other));
    }
}

struct CollisionDemoApp {
    world: World,
    movers: Vec<Mover>,
    sweeper: Entity,
    pentagon: Entity,
    log: EventLog,
    visualizer: CollisionDebugVisualizer,
    dt: f32,
}

impl CollisionDemoApp {
    fn new(config: &SimulationConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut world = World::from_config(config)?;
        let mut names = HashMap::new();

        for (handle, collider) in world.registry().colliders() {
            names.insert(handle, format!("config#{}", collider.owner.id()));
        }

        let sweeper = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(-ARENA_HALF_SIZE, 0.0)));
        let handle = world.add_collider(Collider::rect(sweeper, Vec2::new(1.5, 1.5)));
        names.insert(handle, "sweeper".to_string());

        let pentagon = world.create_entity_with_transform(Transform2D::identity().with_uniform_scale(3.0));
        let handle = world.add_collider(Collider::default_polygon(pentagon));
        names.insert(handle, "pentagon".to_string());

        let mut rng = rand::thread_rng();
        let mut movers = Vec::with_capacity(NUM_CIRCLES);
        for i in 0..NUM_CIRCLES {
            let bounds = ARENA_HALF_SIZE - 1.0;
            let position = Vec2::new(rng.gen_range(-bounds..bounds), rng.gen_range(-bounds..bounds));
            let direction = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let velocity = direction.try_normalize(1e-6).unwrap_or_else(|| Vec2::new(1.0, 0.0)) * CIRCLE_SPEED;
            let radius = rng.gen_range(0.5..1.5);

            let entity = world.create_entity_with_transform(Transform2D::from_position(position));
            let handle = world.add_collider(Collider::circle(entity, radius));
            names.insert(handle, format!("circle{i}"));
            movers.push(Mover { entity, velocity });
        }

        info!("Scene ready: {} colliders, pair mode {:?}", world.registry().len(), config.collision.pair_mode);

        Ok(Self {
            world,
            movers,
            sweeper,
            pentagon,
            log: EventLog {
                names,
                tick: 0,
                enters: 0,
                exits: 0,
            },
            visualizer: CollisionDebugVisualizer::new(),
            dt: config.tick_duration(),
        })
    }

    fn step(&mut self) {
        self.log.tick += 1;
        let dt = self.dt;

        let sweep_span = 2.0 * ARENA_HALF_SIZE;
        let sweep_x = -ARENA_HALF_SIZE + (self.log.tick as f32 * dt * SWEEPER_SPEED) % sweep_span;
        self.world.set_position(self.sweeper, Vec2::new(sweep_x, 0.0));

        let angle = self.log.tick as f32 * dt * PENTAGON_SPIN;
        self.world.set_transform(
            self.pentagon,
            Transform2D::identity().with_uniform_scale(3.0).with_rotation(angle),
        );

        for mover in &mut self.movers {
            let current = self.world.transform(mover.entity).map_or_else(Vec2::zeros, |t| t.position);
            let mut next = current + mover.velocity * dt;
            if next.x.abs() > ARENA_HALF_SIZE {
                mover.velocity.x = -mover.velocity.x;
                next.x = next.x.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
            }
            if next.y.abs() > ARENA_HALF_SIZE {
                mover.velocity.y = -mover.velocity.y;
                next.y = next.y.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
            }
            self.world.set_position(mover.entity, next);
        }

        let stats = self.world.tick(&mut self.log);

        self.visualizer.clear();
        self.visualizer.draw_registry(self.world.registry(), &self.world);
        debug!(
            "[tick {:>4}] {} tests, {} active records, {} outline segments",
            self.log.tick,
            stats.pairs_tested,
            self.world.registry().record_count(),
            self.visualizer.lines().len()
        );
    }

    fn run(mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }

        let colliding = self
            .world
            .registry()
            .colliders()
            .filter(|(handle, _)| self.world.collision_states().is_colliding(*handle))
            .count();

        println!();
        println!("=== Summary after {} ticks ===", ticks);
        println!("  enter events: {}", self.log.enters);
        println!("  exit events:  {}", self.log.exits);
        println!("  colliders currently colliding: {}", colliding);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulationConfig::load_or_default(&path),
        None => SimulationConfig::default(),
    };
    let ticks = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_TICKS,
    };

    logging::init_with_level(&config.log_level);

    println!("=== Collision Lifecycle Demo ===");
    println!("Usage: collision_demo [config.toml|config.ron] [ticks]");
    println!();

    let app = CollisionDemoApp::new(&config)?;
    app.run(ticks);
    Ok(())
}
