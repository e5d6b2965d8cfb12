//=========================================================================
// Component Storage
//=========================================================================
//
// Sparse-set columns: one densely packed value array per component type,
// indexed through a sparse table keyed by entity slot. Insert, remove
// and lookup are O(1); removal swap-removes within the dense arrays so
// iteration never touches holes.
//
// Columns are type-erased behind `ComponentColumn` so the world can own
// them in a single map without knowing concrete types. Type-specific
// access goes through `Any` downcasts.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::entity::Entity;

//=== ComponentColumn =====================================================

/// Type-erased interface over a [`SparseSet`] column.
///
/// Preserves the operations the world needs without compile-time type
/// knowledge: structural removal on despawn, length queries, and `Any`
/// downcasts for typed access.
pub trait ComponentColumn: Send + Sync {
    /// Removes the entity's value from this column, if present.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Number of entities with a value in this column.
    fn len(&self) -> usize;

    /// True if the column holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored value.
    fn clear(&mut self);

    /// Downcasts to `&dyn Any` for typed operations.
    fn as_any(&self) -> &dyn Any;

    /// Downcasts to `&mut dyn Any` for typed operations.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== SparseSet ===========================================================

const NO_SLOT: u32 = u32::MAX;

/// Densely packed storage for one component type.
pub struct SparseSet<T> {
    // sparse[entity_index] -> position in `dense`, or NO_SLOT.
    sparse: Vec<u32>,
    dense: Vec<T>,
    entities: Vec<Entity>,
}

impl<T> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            entities: Vec::new(),
        }
    }

    #[inline]
    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let slot = *self.sparse.get(entity.index() as usize)?;
        if slot == NO_SLOT {
            return None;
        }
        // Generation check guards against a recycled slot index.
        (self.entities[slot as usize] == entity).then_some(slot as usize)
    }

    /// Inserts or replaces the entity's value, returning the previous
    /// value when one was present.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(index) = self.dense_index(entity) {
            return Some(std::mem::replace(&mut self.dense[index], value));
        }

        let sparse_index = entity.index() as usize;
        if sparse_index >= self.sparse.len() {
            self.sparse.resize(sparse_index + 1, NO_SLOT);
        }

        self.sparse[sparse_index] = self.dense.len() as u32;
        self.dense.push(value);
        self.entities.push(entity);
        None
    }

    /// Removes and returns the entity's value.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.dense_index(entity)?;
        let last = self.dense.len() - 1;

        self.dense.swap(index, last);
        self.entities.swap(index, last);
        let value = self.dense.pop();
        self.entities.pop();
        self.sparse[entity.index() as usize] = NO_SLOT;

        // The swapped-in tail entity now lives at `index`.
        if index <= last && index < self.entities.len() {
            let moved = self.entities[index];
            self.sparse[moved.index() as usize] = index as u32;
        }
        value
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|index| &self.dense[index])
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.dense_index(entity).map(|index| &mut self.dense[index])
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    /// Iterates `(Entity, &T)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterates `(Entity, &mut T)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================

impl<T: Send + Sync + 'static> ComponentColumn for SparseSet<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.entities.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
