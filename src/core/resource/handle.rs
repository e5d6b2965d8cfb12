//=========================================================================
// Resource Handles
//=========================================================================
//
// Typed, copyable references into the resource manager's slot arena.
// A handle carries the slot index plus the slot's generation at issue
// time, so a handle held past the resource's final release is detected
// rather than silently reading a recycled slot.
//
//=========================================================================

use std::fmt;
use std::marker::PhantomData;

//=== ResourceHandle ======================================================

/// Typed handle to a managed resource.
///
/// Copying the handle does **not** touch the reference count; ownership
/// of a count is transferred explicitly via
/// [`crate::core::resource::ResourceManager::acquire`] and
/// [`crate::core::resource::ResourceManager::release`].
pub struct ResourceHandle<T> {
    pub(super) slot: u32,
    pub(super) generation: u32,
    pub(super) _marker: PhantomData<fn() -> T>,
}

impl<T> ResourceHandle<T> {
    /// Slot index in the manager's arena.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when this handle was issued.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

// Manual impls: `T` itself need not be Clone/Copy for the handle to be.
impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceHandle<T> {}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.generation == other.generation
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceHandle<{}>({}v{})",
            std::any::type_name::<T>(),
            self.slot,
            self.generation
        )
    }
}
