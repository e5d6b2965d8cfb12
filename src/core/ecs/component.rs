//=========================================================================
// Components
//=========================================================================
//
// Components are plain data attached to entities. Each component type
// gets a dense `ComponentId` on first use; the registry maps `TypeId`
// to that id and enforces the configured `max_components` limit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::error::EcsError;

//=== Component ===========================================================

/// Marker trait for types storable as entity components.
///
/// Blanket-implemented for every `'static + Send + Sync` type, so any
/// owned data structure qualifies without ceremony.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

//=== ComponentId =========================================================

/// Dense identifier for a registered component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    /// Raw index of this component type in registration order.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

//=== ComponentRegistry ===================================================

/// Maps component types to dense ids, bounded by `max_components`.
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
    capacity: u32,
    validation: bool,
}

impl ComponentRegistry {
    /// Creates a registry bounded at `capacity` distinct types.
    pub fn new(capacity: u32, validation: bool) -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
            capacity,
            validation,
        }
    }

    /// Returns the id for `T`, registering it on first use.
    ///
    /// Fails with [`EcsError::ComponentCapacity`] once `max_components`
    /// distinct types have been registered.
    pub fn register<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        let type_id = TypeId::of::<T>();
        if let Some(id) = self.ids.get(&type_id) {
            return Ok(*id);
        }

        if self.names.len() as u32 >= self.capacity {
            if self.validation {
                warn!(
                    "component registration of {} rejected: capacity of {} reached",
                    type_name::<T>(),
                    self.capacity
                );
            }
            return Err(EcsError::ComponentCapacity { capacity: self.capacity });
        }

        let id = ComponentId(self.names.len() as u32);
        self.names.push(type_name::<T>());
        self.ids.insert(type_id, id);
        debug!("registered component {} as id {}", type_name::<T>(), id.0);
        Ok(id)
    }

    /// Looks up the id for `T` without registering it.
    #[inline]
    pub fn get<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Human-readable type name for a registered id.
    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.0 as usize).copied()
    }

    /// Number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no component types are registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;
    struct Health;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = ComponentRegistry::new(8, false);
        let first = registry.register::<Position>().unwrap();
        let second = registry.register::<Position>().unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ids_are_dense_in_registration_order() {
        let mut registry = ComponentRegistry::new(8, false);
        assert_eq!(registry.register::<Position>().unwrap().index(), 0);
        assert_eq!(registry.register::<Velocity>().unwrap().index(), 1);
        assert_eq!(registry.register::<Health>().unwrap().index(), 2);
    }

    #[test]
    fn capacity_limit_is_enforced() {
        let mut registry = ComponentRegistry::new(2, false);
        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();
        assert_eq!(
            registry.register::<Health>(),
            Err(EcsError::ComponentCapacity { capacity: 2 })
        );
        // Already-registered types keep resolving.
        assert!(registry.register::<Position>().is_ok());
    }

    #[test]
    fn lookup_without_registration_returns_none() {
        let registry = ComponentRegistry::new(8, false);
        assert!(registry.get::<Position>().is_none());
    }

    #[test]
    fn names_are_recorded() {
        let mut registry = ComponentRegistry::new(8, false);
        let id = registry.register::<Position>().unwrap();
        assert!(registry.name(id).unwrap().contains("Position"));
    }
}
