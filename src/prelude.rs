//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use dfc_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::{EngineConfig, EngineError, EngineVersion, ENGINE_VERSION};

// Process-wide facade
pub use crate::{engine_version, initialize_engine, shutdown_engine, tick_engine};

// Entity-component system
pub use crate::core::ecs::{CommandBuffer, Component, Entity, World};

// Resources
pub use crate::core::resource::{ResourceHandle, ResourceManager};

// Scheduling
pub use crate::core::schedule::{Task, TaskGraph, TaskId, TickContext};
