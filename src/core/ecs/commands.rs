//=========================================================================
// Deferred Commands
//=========================================================================
//
// Tasks run against a shared `&World` and therefore cannot mutate it
// directly. Structural changes (spawns, despawns, component adds and
// removes) are recorded into a per-task `CommandBuffer` and applied at
// the synchronization point between schedule waves.
//
// Invariants:
// - Commands are applied in the order they were recorded.
// - A command against an entity that died before the sync point fails
//   through the world's normal rejection path; the rest of the buffer
//   still applies.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::component::Component;
use super::entity::Entity;
use super::world::World;

//=== CommandBuffer =======================================================

type Command = Box<dyn FnOnce(&mut World) + Send>;

/// Ordered queue of deferred world mutations.
///
/// # Examples
///
/// ```
/// use dfc_engine::{EngineConfig, core::ecs::{CommandBuffer, World}};
///
/// struct Score(u32);
///
/// let mut world = World::new(&EngineConfig::default());
/// let player = world.spawn().unwrap();
///
/// let mut commands = CommandBuffer::new();
/// commands.insert(player, Score(0));
/// commands.apply(&mut world);
///
/// assert!(world.has::<Score>(player));
/// ```
#[derive(Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Queues a spawn. The component is attached to the new entity when
    /// the buffer is applied; a capacity failure drops the spawn with a
    /// warning.
    pub fn spawn_with<T: Component>(&mut self, component: T) {
        self.commands.push(Box::new(move |world| {
            match world.spawn() {
                Ok(entity) => {
                    if let Err(err) = world.insert(entity, component) {
                        warn!("deferred spawn lost its component: {err}");
                    }
                }
                Err(err) => warn!("deferred spawn dropped: {err}"),
            }
        }));
    }

    /// Queues an entity despawn.
    pub fn despawn(&mut self, entity: Entity) {
        self.commands.push(Box::new(move |world| {
            world.despawn(entity);
        }));
    }

    /// Queues a component insert on an existing entity.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) {
        self.commands.push(Box::new(move |world| {
            if let Err(err) = world.insert(entity, component) {
                warn!("deferred insert dropped: {err}");
            }
        }));
    }

    /// Queues a component removal. The removed value is dropped.
    pub fn remove<T: Component>(&mut self, entity: Entity) {
        self.commands.push(Box::new(move |world| {
            world.remove::<T>(entity);
        }));
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Applies every queued command in recorded order, draining the
    /// buffer.
    pub fn apply(&mut self, world: &mut World) {
        for command in self.commands.drain(..) {
            command(world);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
