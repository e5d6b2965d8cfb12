//=========================================================================
// World
//=========================================================================
//
// The world ties the entity allocator, the component registry and the
// per-type columns together behind one API. All structural state lives
// here; tasks read it during a tick and mutate it through deferred
// command buffers between waves.
//
// Capacity limits (`max_entities`, `max_components`) come from the
// engine config and are enforced by the allocator and the registry.
// With `enable_validation` set, misuse against dead entities is also
// reported through `log::warn!`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::type_name;
use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::error::EcsError;

use super::component::{Component, ComponentId, ComponentRegistry};
use super::entity::{Entity, EntityAllocator};
use super::storage::{ComponentColumn, SparseSet};

//=== World ===============================================================

/// Entity-component storage for one engine instance.
///
/// # Examples
///
/// ```
/// use dfc_engine::{EngineConfig, core::ecs::World};
///
/// struct Position { x: f32, y: f32 }
///
/// let mut world = World::new(&EngineConfig::default());
/// let player = world.spawn().unwrap();
/// world.insert(player, Position { x: 0.0, y: 0.0 }).unwrap();
///
/// for (_, position) in world.query::<Position>() {
///     assert_eq!(position.x, 0.0);
/// }
/// ```
pub struct World {
    entities: EntityAllocator,
    registry: ComponentRegistry,
    columns: HashMap<ComponentId, Box<dyn ComponentColumn>>,
    validation: bool,
}

impl World {
    /// Creates an empty world with the config's capacity limits.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            entities: EntityAllocator::new(config.max_entities, config.enable_validation),
            registry: ComponentRegistry::new(config.max_components, config.enable_validation),
            columns: HashMap::new(),
            validation: config.enable_validation,
        }
    }

    //--- Entities ---------------------------------------------------------

    /// Allocates a new, component-less entity.
    pub fn spawn(&mut self) -> Result<Entity, EcsError> {
        self.entities.allocate()
    }

    /// Destroys an entity and drops all of its components.
    ///
    /// Returns `false` for dead or stale handles.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove_entity(entity);
        }
        true
    }

    /// True if the handle refers to a live entity.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> u32 {
        self.entities.live_count()
    }

    /// True if no entities are alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.live_count() == 0
    }

    /// Iterates every live entity handle.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter_live()
    }

    //--- Components -------------------------------------------------------

    /// Registers `T` ahead of use. Implied by the first `insert`, but
    /// callable up front so capacity failures surface at startup.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        let id = self.registry.register::<T>()?;
        self.columns
            .entry(id)
            .or_insert_with(|| Box::new(SparseSet::<T>::new()));
        Ok(id)
    }

    /// Attaches a component to an entity, replacing any existing value
    /// of the same type.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if !self.entities.is_alive(entity) {
            if self.validation {
                warn!(
                    "insert of {} on dead entity {}v{}",
                    type_name::<T>(),
                    entity.index(),
                    entity.generation()
                );
            }
            return Err(EcsError::DeadEntity {
                index: entity.index(),
                generation: entity.generation(),
            });
        }

        let id = self.register_component::<T>()?;
        self.column_mut::<T>(id).insert(entity, value);
        Ok(())
    }

    /// Detaches and returns a component from an entity.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let id = self.registry.get::<T>()?;
        self.column_mut::<T>(id).remove(entity)
    }

    /// Borrows an entity's component.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let id = self.registry.get::<T>()?;
        self.column::<T>(id).get(entity)
    }

    /// Mutably borrows an entity's component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let id = self.registry.get::<T>()?;
        self.column_mut::<T>(id).get_mut(entity)
    }

    /// True if the entity currently has a `T` component.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.registry
            .get::<T>()
            .is_some_and(|id| self.column::<T>(id).contains(entity))
    }

    //--- Queries ----------------------------------------------------------

    /// Iterates `(Entity, &T)` over every entity holding a `T`.
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.registry
            .get::<T>()
            .map(|id| self.column::<T>(id).iter())
            .into_iter()
            .flatten()
    }

    /// Iterates `(Entity, &mut T)` over every entity holding a `T`.
    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        let id = self.registry.get::<T>();
        id.and_then(|id| {
            self.columns
                .get_mut(&id)
                .and_then(|column| column.as_any_mut().downcast_mut::<SparseSet<T>>())
        })
        .map(SparseSet::iter_mut)
        .into_iter()
        .flatten()
    }

    /// Number of entities holding a `T`.
    pub fn count<T: Component>(&self) -> usize {
        self.registry
            .get::<T>()
            .and_then(|id| self.columns.get(&id))
            .map_or(0, |column| column.len())
    }

    //--- Teardown ---------------------------------------------------------

    /// Despawns everything. Registered component types remain known so
    /// their ids stay stable for the engine's lifetime.
    pub fn clear(&mut self) {
        self.entities.clear();
        for column in self.columns.values_mut() {
            column.clear();
        }
    }

    //--- Internals --------------------------------------------------------

    fn column<T: Component>(&self, id: ComponentId) -> &SparseSet<T> {
        self.columns
            .get(&id)
            .and_then(|column| column.as_any().downcast_ref::<SparseSet<T>>())
            .unwrap_or_else(|| {
                unreachable!("registry id {} always has a matching column", id.index())
            })
    }

    fn column_mut<T: Component>(&mut self, id: ComponentId) -> &mut SparseSet<T> {
        self.columns
            .get_mut(&id)
            .and_then(|column| column.as_any_mut().downcast_mut::<SparseSet<T>>())
            .unwrap_or_else(|| {
                unreachable!("registry id {} always has a matching column", id.index())
            })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Debug, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    fn world() -> World {
        World::new(&EngineConfig::default())
    }

    #[test]
    fn spawn_insert_get_roundtrip() {
        let mut world = world();
        let entity = world.spawn().unwrap();
        world.insert(entity, Position { x: 1.0, y: 2.0 }).unwrap();

        assert!(world.has::<Position>(entity));
        assert_eq!(world.get::<Position>(entity), Some(&Position { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn insert_on_dead_entity_fails() {
        let mut world = world();
        let entity = world.spawn().unwrap();
        world.despawn(entity);

        let result = world.insert(entity, Position { x: 0.0, y: 0.0 });
        assert!(matches!(result, Err(EcsError::DeadEntity { .. })));
    }

    #[test]
    fn despawn_drops_all_components() {
        let mut world = world();
        let entity = world.spawn().unwrap();
        world.insert(entity, Position { x: 0.0, y: 0.0 }).unwrap();
        world.insert(entity, Velocity { dx: 1.0, dy: 0.0 }).unwrap();

        assert!(world.despawn(entity));
        assert_eq!(world.count::<Position>(), 0);
        assert_eq!(world.count::<Velocity>(), 0);
        assert!(world.get::<Position>(entity).is_none());
    }

    #[test]
    fn query_visits_only_holders() {
        let mut world = world();
        let a = world.spawn().unwrap();
        let b = world.spawn().unwrap();
        let _bare = world.spawn().unwrap();

        world.insert(a, Position { x: 1.0, y: 0.0 }).unwrap();
        world.insert(b, Position { x: 2.0, y: 0.0 }).unwrap();

        let mut xs: Vec<f32> = world.query::<Position>().map(|(_, p)| p.x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn query_mut_updates_in_place() {
        let mut world = world();
        let entity = world.spawn().unwrap();
        world.insert(entity, Position { x: 1.0, y: 1.0 }).unwrap();

        for (_, position) in world.query_mut::<Position>() {
            position.x += 10.0;
        }
        assert_eq!(world.get::<Position>(entity).unwrap().x, 11.0);
    }

    #[test]
    fn query_of_unregistered_type_is_empty() {
        let world = world();
        assert_eq!(world.query::<Position>().count(), 0);
    }

    #[test]
    fn entity_capacity_is_respected() {
        let config = EngineConfig { max_entities: 1, ..Default::default() };
        let mut world = World::new(&config);
        world.spawn().unwrap();
        assert!(matches!(world.spawn(), Err(EcsError::EntityCapacity { .. })));
    }

    #[test]
    fn component_capacity_is_respected() {
        let config = EngineConfig { max_components: 1, ..Default::default() };
        let mut world = World::new(&config);
        let entity = world.spawn().unwrap();
        world.insert(entity, Position { x: 0.0, y: 0.0 }).unwrap();

        let result = world.insert(entity, Velocity { dx: 0.0, dy: 0.0 });
        assert!(matches!(result, Err(EcsError::ComponentCapacity { .. })));
    }

    #[test]
    fn clear_empties_world_but_keeps_registrations() {
        let mut world = world();
        let entity = world.spawn().unwrap();
        world.insert(entity, Position { x: 0.0, y: 0.0 }).unwrap();

        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.count::<Position>(), 0);

        // Same type still registers to the same id afterwards.
        let before = world.register_component::<Position>().unwrap();
        let after = world.register_component::<Position>().unwrap();
        assert_eq!(before, after);
    }
}
