//=========================================================================
// Entity-Component System
//=========================================================================
//
// Data-oriented entity storage.
//
// Entities are generational indices; components live in per-type
// sparse-set columns; behavior is composed by attaching components and
// iterating them from scheduled tasks.
//
// Module layout:
// - `entity`    — handles and the free-list allocator
// - `component` — the `Component` trait and type registry
// - `storage`   — sparse-set columns and their type-erased interface
// - `world`     — the public storage API
// - `commands`  — deferred structural mutation
//
//=========================================================================

mod commands;
mod component;
mod entity;
mod storage;
mod world;

//=== Public Exports ======================================================

pub use commands::CommandBuffer;
pub use component::{Component, ComponentId, ComponentRegistry};
pub use entity::{Entity, EntityAllocator};
pub use storage::{ComponentColumn, SparseSet};
pub use world::World;
