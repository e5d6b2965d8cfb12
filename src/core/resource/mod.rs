//=========================================================================
// Resource Management
//=========================================================================
//
// Reference-counted resource storage with explicit release points.
//
// Module layout:
// - `handle`  — typed, copyable slot handles
// - `manager` — the slot arena and refcount bookkeeping
//
//=========================================================================

mod handle;
mod manager;

//=== Public Exports ======================================================

pub use handle::ResourceHandle;
pub use manager::ResourceManager;
