//! ECS World implementation

use log::{debug, info, warn};

use super::components::{CollisionStateComponent, CollisionStates};
use super::Entity;
use crate::core::config::{ConfigError, CollisionConfig, PairMode, SimulationConfig};
use crate::foundation::math::Vec2;
use crate::physics::{
    Collider,
    ColliderHandle,
    CollisionError,
    CollisionListener,
    CollisionRegistry,
    TickStats,
    Transform2D,
    TransformTable,
    WorldResolver,
};

/// World containing entities, their transforms and their colliders
///
/// Each world owns its own [`CollisionRegistry`]; nothing is shared between
/// worlds.
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    transforms: TransformTable,
    collisions: CollisionRegistry,
    collision_states: CollisionStates,
}

impl World {
    /// Create a new world with the default collision configuration
    pub fn new() -> Self {
        Self::with_collision_config(CollisionConfig::default())
    }

    /// Create a new world with the given collision configuration
    pub fn with_collision_config(config: CollisionConfig) -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            transforms: TransformTable::new(),
            collisions: CollisionRegistry::with_config(config),
            collision_states: CollisionStates::new(),
        }
    }

    /// Build a world from a simulation configuration
    ///
    /// Entities referenced by the configured colliders are created with the
    /// ids the configuration gives them and placed at the origin.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self::with_collision_config(config.collision.clone());
        for collider in &config.colliders {
            world.adopt_entity(collider.owner);
            world.collisions.register(collider.clone());
        }

        info!(
            "World created with {} entities and {} colliders",
            world.entities.len(),
            world.collisions.len()
        );
        Ok(world)
    }

    /// Create a new entity at the origin
    ///
    /// Ids are handed out sequentially. Once `u32::MAX` is reached the id
    /// space is exhausted and that id is handed out again.
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        match self.next_entity_id.checked_add(1) {
            Some(next) => self.next_entity_id = next,
            None => warn!("Entity id space exhausted, reusing id {}", entity.id()),
        }
        self.entities.push(entity);
        entity
    }

    /// Create a new entity with a transform
    pub fn create_entity_with_transform(&mut self, transform: Transform2D) -> Entity {
        let entity = self.create_entity();
        self.transforms.set(entity, transform);
        entity
    }

    fn adopt_entity(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            self.entities.push(entity);
            self.next_entity_id = self.next_entity_id.max(entity.id().saturating_add(1));
        }
    }

    /// Destroy an entity and unregister every collider it owns
    ///
    /// No exit callbacks fire for the removed colliders. Returns `false` if
    /// the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(index) = self.entities.iter().position(|&e| e == entity) else {
            return false;
        };
        self.entities.remove(index);

        let handles = self.collisions.colliders_of(entity);
        for &handle in &handles {
            self.collisions.unregister(handle);
            self.forget_collision_state(handle);
        }
        self.transforms.remove(entity);

        debug!("Destroyed entity {} ({} colliders)", entity.id(), handles.len());
        true
    }

    /// Check if an entity is alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Set the transform of an entity
    pub fn set_transform(&mut self, entity: Entity, transform: Transform2D) {
        self.transforms.set(entity, transform);
    }

    /// Move an entity, keeping rotation and scale
    pub fn set_position(&mut self, entity: Entity, position: Vec2) {
        self.transforms.set_position(entity, position);
    }

    /// Get the transform of an entity, if one was set
    pub fn transform(&self, entity: Entity) -> Option<&Transform2D> {
        self.transforms.get(entity)
    }

    /// Attach a collider to its owner
    pub fn add_collider(&mut self, collider: Collider) -> ColliderHandle {
        if !self.is_alive(collider.owner) {
            warn!("Adding collider to entity {} which is not alive", collider.owner.id());
        }
        self.collisions.register(collider)
    }

    /// Validate a collider, then attach it
    pub fn try_add_collider(&mut self, collider: Collider) -> Result<ColliderHandle, CollisionError> {
        collider.validate()?;
        Ok(self.add_collider(collider))
    }

    /// Detach a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        let removed = self.collisions.unregister(handle);
        self.forget_collision_state(handle);
        removed
    }

    /// Drop state for an unregistered collider
    ///
    /// Unordered mode drops the partners' records as well, so they must stop
    /// reporting the collider. Ordered mode keeps those records, and the
    /// partners keep receiving stay for it.
    fn forget_collision_state(&mut self, handle: ColliderHandle) {
        match self.collisions.config().pair_mode {
            PairMode::Ordered => {
                self.collision_states.remove(handle);
            }
            PairMode::Unordered => self.collision_states.forget(handle),
        }
    }

    /// Get a collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collisions.get(handle)
    }

    /// Get a collider for modification
    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collisions.get_mut(handle)
    }

    /// Exact overlap test between two colliders at their current transforms
    pub fn intersects(&self, a: ColliderHandle, b: ColliderHandle) -> Result<bool, CollisionError> {
        self.collisions.intersects(a, b, &self.transforms)
    }

    /// Run one collision tick
    ///
    /// Collision state components are refreshed first, then `listener`
    /// receives the same callbacks.
    pub fn tick<L: CollisionListener>(&mut self, listener: &mut L) -> TickStats {
        self.collision_states.begin_frame();
        let mut fan_out = (&mut self.collision_states, listener);
        self.collisions.update(&self.transforms, &mut fan_out)
    }

    /// Collision state of a collider after the latest tick
    pub fn collision_state(&self, handle: ColliderHandle) -> Option<&CollisionStateComponent> {
        self.collision_states.get(handle)
    }

    /// Collision states of all colliders
    pub fn collision_states(&self) -> &CollisionStates {
        &self.collision_states
    }

    /// Get the collision registry
    pub fn registry(&self) -> &CollisionRegistry {
        &self.collisions
    }

    /// Get the collision registry for modification
    pub fn registry_mut(&mut self) -> &mut CollisionRegistry {
        &mut self.collisions
    }

    /// Get the transform table
    pub fn transforms(&self) -> &TransformTable {
        &self.transforms
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldResolver for World {
    fn world_position(&self, entity: Entity) -> Vec2 {
        self.transforms.world_position(entity)
    }

    fn world_rotation(&self, entity: Entity) -> f32 {
        self.transforms.world_rotation(entity)
    }

    fn world_scale(&self, entity: Entity) -> Vec2 {
        self.transforms.world_scale(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{CollisionEvent, CollisionEventKind};

    fn world_with_pair() -> (World, Entity, Entity, ColliderHandle, ColliderHandle) {
        let mut world = World::new();
        let a = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(0.0, 0.0)));
        let b = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(1.0, 0.0)));
        let ha = world.add_collider(Collider::circle(a, 1.0));
        let hb = world.add_collider(Collider::circle(b, 1.0));
        (world, a, b, ha, hb)
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut world = World::new();
        let first = world.create_entity();
        let second = world.create_entity();

        assert_eq!(first.id(), 0);
        assert_eq!(second.id(), 1);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_tick_updates_collision_states() {
        let (mut world, _, b, ha, hb) = world_with_pair();

        world.tick(&mut ());
        let state = world.collision_state(ha).unwrap();
        assert!(state.just_collided_with(hb));

        world.set_position(b, Vec2::new(5.0, 0.0));
        world.tick(&mut ());
        let state = world.collision_state(ha).unwrap();
        assert!(!state.is_colliding());
        assert!(state.just_stopped_colliding_with(hb));
    }

    #[test]
    fn test_tick_forwards_to_listener() {
        let (mut world, _, _, ha, hb) = world_with_pair();
        let mut events = Vec::new();

        let stats = world.tick(&mut events);

        assert_eq!(stats.entered, 2);
        assert_eq!(events[0], CollisionEvent::new(CollisionEventKind::Enter, ha, hb));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_destroy_entity_unregisters_its_colliders() {
        let (mut world, a, _, ha, _) = world_with_pair();
        world.add_collider(Collider::rect(a, Vec2::new(0.5, 0.5)));
        world.tick(&mut ());

        assert!(world.destroy_entity(a));
        assert!(!world.is_alive(a));
        assert!(!world.registry().contains(ha));
        assert_eq!(world.registry().len(), 1);
        assert!(world.transform(a).is_none());

        let mut events = Vec::new();
        world.tick(&mut events);
        assert!(events.iter().all(|e| e.collider != ha));

        assert!(!world.destroy_entity(a));
    }

    #[test]
    fn test_from_config_adopts_entities() {
        let mut config = SimulationConfig::default();
        config.colliders.push(Collider::circle(Entity::new(3), 1.0));
        config.colliders.push(Collider::rect(Entity::new(5), Vec2::new(1.0, 1.0)));

        let mut world = World::from_config(&config).unwrap();

        assert!(world.is_alive(Entity::new(3)));
        assert!(world.is_alive(Entity::new(5)));
        assert_eq!(world.registry().len(), 2);
        assert_eq!(world.create_entity().id(), 6);
    }

    #[test]
    fn test_from_config_rejects_invalid_colliders() {
        let mut config = SimulationConfig::default();
        config.colliders.push(Collider::circle(Entity::new(1), 0.0));

        assert!(World::from_config(&config).is_err());
    }

    #[test]
    fn test_destroy_entity_clears_partner_state_in_unordered_mode() {
        let mut world = World::with_collision_config(CollisionConfig::redesigned());
        let a = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(0.0, 0.0)));
        let b = world.create_entity_with_transform(Transform2D::from_position(Vec2::new(1.0, 0.0)));
        world.add_collider(Collider::circle(a, 1.0));
        let hb = world.add_collider(Collider::circle(b, 1.0));
        world.tick(&mut ());
        world.tick(&mut ());
        assert!(world.collision_states().is_colliding(hb));

        world.destroy_entity(a);
        for _ in 0..3 {
            world.tick(&mut ());
        }

        assert_eq!(world.registry().record_count(), 0);
        assert!(!world.collision_states().is_colliding(hb));
        assert!(world.collision_state(hb).is_none());
    }

    #[test]
    fn test_remove_collider_keeps_partner_state_in_ordered_mode() {
        let (mut world, _, _, ha, hb) = world_with_pair();
        world.tick(&mut ());

        assert!(world.remove_collider(ha));
        world.tick(&mut ());

        // (hb, ha) is still recorded, so hb keeps reporting ha
        assert!(world.registry().is_colliding(hb, ha));
        assert!(world.collision_state(hb).unwrap().is_colliding_with(ha));
    }

    #[test]
    fn test_max_entity_id_does_not_overflow() {
        let mut config = SimulationConfig::default();
        config.colliders.push(Collider::circle(Entity::new(u32::MAX - 1), 1.0));

        let mut world = World::from_config(&config).unwrap();
        assert_eq!(world.create_entity().id(), u32::MAX);
        assert_eq!(world.create_entity().id(), u32::MAX);

        let mut config = SimulationConfig::default();
        config.colliders.push(Collider::circle(Entity::new(u32::MAX), 1.0));
        assert!(matches!(World::from_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_collider_mutation_takes_effect_next_test() {
        let (mut world, _, _, ha, hb) = world_with_pair();
        assert_eq!(world.intersects(ha, hb), Ok(true));

        if let Some(collider) = world.collider_mut(ha) {
            collider.offset = Vec2::new(-10.0, 0.0);
        }
        assert_eq!(world.intersects(ha, hb), Ok(false));
    }

    #[test]
    fn test_world_resolves_transforms() {
        let mut world = World::new();
        let entity = world.create_entity_with_transform(
            Transform2D::from_position(Vec2::new(2.0, 3.0)).with_rotation(1.0).with_uniform_scale(2.0),
        );

        assert_eq!(world.world_position(entity), Vec2::new(2.0, 3.0));
        assert_eq!(world.world_rotation(entity), 1.0);
        assert_eq!(world.world_scale(entity), Vec2::new(2.0, 2.0));
    }
}
