//=========================================================================
// Resource Manager
//=========================================================================
//
// Slot arena of reference-counted resources with explicit release
// points. Unlike `Arc`, the count is owned by the manager and moved
// explicitly: `insert` issues a handle holding one count, `acquire`
// adds one, `release` removes one and drops the value at zero. Slots
// are recycled through a free list with a generation bump, mirroring
// the entity allocator, so stale handles fail loudly instead of
// aliasing a later resource.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::marker::PhantomData;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::error::ResourceError;

use super::handle::ResourceHandle;

//=== ResourceManager =====================================================

struct Slot {
    generation: u32,
    refcount: u32,
    name: String,
    value: Option<Box<dyn Any + Send + Sync>>,
}

/// Owner of all engine-managed resources.
///
/// # Examples
///
/// ```
/// use dfc_engine::core::resource::ResourceManager;
///
/// struct Mesh { vertex_count: usize }
///
/// let mut resources = ResourceManager::new();
/// let handle = resources.insert("quad", Mesh { vertex_count: 4 });
///
/// assert_eq!(resources.get(handle).unwrap().vertex_count, 4);
/// assert!(resources.release(handle).unwrap()); // count 1 -> 0, dropped
/// assert!(resources.get(handle).is_none());
/// ```
#[derive(Default)]
pub struct ResourceManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ResourceManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a resource and issues a handle owning one reference.
    ///
    /// The `name` is only used in logs and diagnostics.
    pub fn insert<T: Send + Sync + 'static>(
        &mut self,
        name: &str,
        value: T,
    ) -> ResourceHandle<T> {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    refcount: 0,
                    name: String::new(),
                    value: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let entry = &mut self.slots[slot as usize];
        entry.refcount = 1;
        entry.name = name.to_string();
        entry.value = Some(Box::new(value));
        self.live += 1;

        debug!("resource '{}' stored in slot {}", name, slot);
        ResourceHandle {
            slot,
            generation: entry.generation,
            _marker: PhantomData,
        }
    }

    /// Adds one reference for an additional owner of the handle.
    pub fn acquire<T: Send + Sync + 'static>(
        &mut self,
        handle: ResourceHandle<T>,
    ) -> Result<(), ResourceError> {
        let entry = self.live_slot_mut(handle.slot, handle.generation)?;
        entry.refcount += 1;
        Ok(())
    }

    /// Removes one reference; drops the value when the count hits zero.
    ///
    /// Returns `true` when this release destroyed the resource.
    pub fn release<T: Send + Sync + 'static>(
        &mut self,
        handle: ResourceHandle<T>,
    ) -> Result<bool, ResourceError> {
        let slot = handle.slot;
        let entry = self.live_slot_mut(slot, handle.generation)?;
        entry.refcount -= 1;
        if entry.refcount > 0 {
            return Ok(false);
        }

        debug!("resource '{}' released from slot {}", entry.name, slot);
        entry.value = None;
        entry.name.clear();
        // Bump so outstanding handles to this slot go stale.
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
        self.live -= 1;
        Ok(true)
    }

    /// Borrows the resource behind a handle.
    ///
    /// Returns `None` for stale handles or released resources.
    pub fn get<T: Send + Sync + 'static>(&self, handle: ResourceHandle<T>) -> Option<&T> {
        let entry = self.slots.get(handle.slot as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        entry.value.as_ref()?.downcast_ref::<T>()
    }

    /// Mutably borrows the resource behind a handle.
    pub fn get_mut<T: Send + Sync + 'static>(
        &mut self,
        handle: ResourceHandle<T>,
    ) -> Option<&mut T> {
        let entry = self.slots.get_mut(handle.slot as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        entry.value.as_mut()?.downcast_mut::<T>()
    }

    /// Current reference count of a live resource.
    pub fn refcount<T: Send + Sync + 'static>(&self, handle: ResourceHandle<T>) -> Option<u32> {
        let entry = self.slots.get(handle.slot as usize)?;
        (entry.generation == handle.generation && entry.value.is_some())
            .then_some(entry.refcount)
    }

    /// Number of live resources.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no resources are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every live resource, ignoring outstanding references.
    ///
    /// Called on engine shutdown; leaked references are reported per
    /// resource so the leak is attributable.
    pub fn clear(&mut self) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if entry.value.is_some() {
                if entry.refcount > 0 {
                    warn!(
                        "resource '{}' (slot {}) dropped with {} outstanding reference(s)",
                        entry.name, slot, entry.refcount
                    );
                }
                entry.value = None;
                entry.name.clear();
                entry.refcount = 0;
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(slot as u32);
            }
        }
        self.live = 0;
    }

    //--- Internals --------------------------------------------------------

    fn live_slot_mut(&mut self, slot: u32, generation: u32) -> Result<&mut Slot, ResourceError> {
        match self.slots.get_mut(slot as usize) {
            Some(entry) if entry.generation == generation && entry.value.is_some() => Ok(entry),
            _ => {
                warn!("operation on stale resource handle (slot {})", slot);
                Err(ResourceError::StaleHandle { slot })
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Texture {
        width: u32,
    }

    #[test]
    fn insert_issues_handle_with_one_reference() {
        let mut resources = ResourceManager::new();
        let handle = resources.insert("stone", Texture { width: 64 });

        assert_eq!(resources.refcount(handle), Some(1));
        assert_eq!(resources.get(handle).unwrap().width, 64);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn acquire_and_release_balance() {
        let mut resources = ResourceManager::new();
        let handle = resources.insert("stone", Texture { width: 64 });

        resources.acquire(handle).unwrap();
        assert_eq!(resources.refcount(handle), Some(2));

        assert!(!resources.release(handle).unwrap());
        assert_eq!(resources.refcount(handle), Some(1));

        assert!(resources.release(handle).unwrap());
        assert!(resources.get(handle).is_none());
        assert!(resources.is_empty());
    }

    #[test]
    fn stale_handle_is_rejected_after_slot_reuse() {
        let mut resources = ResourceManager::new();
        let old = resources.insert("old", Texture { width: 1 });
        resources.release(old).unwrap();

        // Slot is recycled with a bumped generation.
        let new = resources.insert("new", Texture { width: 2 });
        assert_eq!(old.slot(), new.slot());
        assert_ne!(old.generation(), new.generation());

        assert!(resources.get(old).is_none());
        assert_eq!(
            resources.acquire(old),
            Err(ResourceError::StaleHandle { slot: old.slot() })
        );
        assert_eq!(resources.get(new).unwrap().width, 2);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut resources = ResourceManager::new();
        let handle = resources.insert("stone", Texture { width: 64 });

        resources.get_mut(handle).unwrap().width = 128;
        assert_eq!(resources.get(handle).unwrap().width, 128);
    }

    #[test]
    fn clear_drops_everything_even_with_outstanding_references() {
        let mut resources = ResourceManager::new();
        let a = resources.insert("a", Texture { width: 1 });
        let b = resources.insert("b", Texture { width: 2 });
        resources.acquire(a).unwrap();

        resources.clear();
        assert!(resources.is_empty());
        assert!(resources.get(a).is_none());
        assert!(resources.get(b).is_none());
    }

    #[test]
    fn handles_are_copy_and_comparable() {
        let mut resources = ResourceManager::new();
        let handle = resources.insert("stone", Texture { width: 64 });
        let copy = handle;
        assert_eq!(handle, copy);
        // Copying does not add a reference.
        assert_eq!(resources.refcount(handle), Some(1));
    }
}
