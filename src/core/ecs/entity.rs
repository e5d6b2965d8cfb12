//=========================================================================
// Entities
//=========================================================================
//
// Entities are opaque generational indices. The low 32 bits of the id
// are a slot index into per-component storage, the high 32 bits are a
// generation counter that is bumped whenever the slot is recycled, so a
// handle kept past despawn can never alias a newer entity.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::error::EcsError;

//=== Entity ==============================================================

/// Opaque handle to a world entity.
///
/// Cheap to copy and safe to hold across frames: once the entity is
/// despawned every operation through a stale handle fails detectably.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u64);

impl Entity {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Slot index into component storage.
    #[inline]
    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// Recycle counter of the slot at the time this handle was issued.
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

//=== EntityAllocator =====================================================

/// Free-list allocator for entity slots.
///
/// Slots are recycled in LIFO order; each recycle bumps the slot's
/// generation. The allocator enforces the `max_entities` limit from
/// [`crate::EngineConfig`]: the live count can never exceed it.
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    live_count: u32,
    capacity: u32,
    validation: bool,
}

impl EntityAllocator {
    /// Creates an allocator bounded at `capacity` live entities.
    pub fn new(capacity: u32, validation: bool) -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            free: Vec::new(),
            live_count: 0,
            capacity,
            validation,
        }
    }

    /// Number of currently live entities.
    #[inline]
    pub fn live_count(&self) -> u32 {
        self.live_count
    }

    /// Allocates a fresh entity handle.
    ///
    /// Returns [`EcsError::EntityCapacity`] once the configured limit is
    /// reached; despawning frees room for future allocations.
    pub fn allocate(&mut self) -> Result<Entity, EcsError> {
        if self.live_count >= self.capacity {
            if self.validation {
                warn!(
                    "entity allocation rejected: capacity of {} reached",
                    self.capacity
                );
            }
            return Err(EcsError::EntityCapacity { capacity: self.capacity });
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                self.alive.push(false);
                index
            }
        };

        self.alive[index as usize] = true;
        self.live_count += 1;
        Ok(Entity::new(index, self.generations[index as usize]))
    }

    /// Releases an entity slot back to the free list.
    ///
    /// Returns `false` for dead or stale handles.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let index = entity.index() as usize;
        if !self.is_alive(entity) {
            if self.validation {
                warn!(
                    "despawn of dead or stale entity {}v{}",
                    entity.index(),
                    entity.generation()
                );
            }
            return false;
        }

        // Bump the generation so outstanding handles go stale.
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.alive[index] = false;
        self.free.push(entity.index());
        self.live_count -= 1;
        true
    }

    /// True if the handle refers to a currently live entity.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let index = entity.index() as usize;
        index < self.generations.len()
            && self.alive[index]
            && self.generations[index] == entity.generation()
    }

    /// Despawns everything and resets generations' live state.
    ///
    /// Generations are preserved, so handles issued before the clear
    /// remain stale rather than aliasing post-clear entities.
    pub fn clear(&mut self) {
        for index in 0..self.generations.len() {
            if self.alive[index] {
                self.generations[index] = self.generations[index].wrapping_add(1);
                self.alive[index] = false;
                self.free.push(index as u32);
            }
        }
        self.live_count = 0;
    }

    /// Iterates all live entity handles in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| Entity::new(index as u32, self.generations[index]))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_round_trip_index_and_generation() {
        let entity = Entity::new(42, 7);
        assert_eq!(entity.index(), 42);
        assert_eq!(entity.generation(), 7);
    }

    #[test]
    fn allocate_then_check_alive() {
        let mut allocator = EntityAllocator::new(8, false);
        let entity = allocator.allocate().unwrap();
        assert!(allocator.is_alive(entity));
        assert_eq!(allocator.live_count(), 1);
    }

    #[test]
    fn deallocate_makes_handle_stale() {
        let mut allocator = EntityAllocator::new(8, false);
        let entity = allocator.allocate().unwrap();
        assert!(allocator.deallocate(entity));
        assert!(!allocator.is_alive(entity));
        // A second despawn of the same handle is rejected.
        assert!(!allocator.deallocate(entity));
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut allocator = EntityAllocator::new(8, false);
        let first = allocator.allocate().unwrap();
        allocator.deallocate(first);

        let second = allocator.allocate().unwrap();
        assert_eq!(first.index(), second.index());
        assert_ne!(first.generation(), second.generation());
        assert!(!allocator.is_alive(first));
        assert!(allocator.is_alive(second));
    }

    #[test]
    fn capacity_limit_is_enforced() {
        let mut allocator = EntityAllocator::new(2, false);
        allocator.allocate().unwrap();
        allocator.allocate().unwrap();
        assert_eq!(
            allocator.allocate(),
            Err(EcsError::EntityCapacity { capacity: 2 })
        );

        // Freeing a slot makes room again.
        let entity = allocator.iter_live().next().unwrap();
        allocator.deallocate(entity);
        assert!(allocator.allocate().is_ok());
    }

    #[test]
    fn clear_stales_all_outstanding_handles() {
        let mut allocator = EntityAllocator::new(8, false);
        let a = allocator.allocate().unwrap();
        let b = allocator.allocate().unwrap();
        allocator.clear();

        assert_eq!(allocator.live_count(), 0);
        assert!(!allocator.is_alive(a));
        assert!(!allocator.is_alive(b));
    }
}
