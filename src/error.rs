//=========================================================================
// Engine Errors
//=========================================================================
//
// Error taxonomy for every fallible engine operation.
//
// Each subsystem owns its error enum (ECS, resources, scheduling, config)
// and `EngineError` wraps them into a single type for the public API
// surface, so callers can match on the subsystem or bubble everything
// with `?`.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== EngineError =========================================================

/// Top-level error type returned by engine construction and the
/// fallible parts of the public API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied [`crate::EngineConfig`] is not usable.
    #[error("invalid engine config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A world operation failed.
    #[error("ecs error: {0}")]
    Ecs(#[from] EcsError),

    /// A resource manager operation failed.
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Building or compiling the task schedule failed.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

//=== ConfigError =========================================================

/// Rejection causes for [`crate::EngineConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_entities` was zero; the world could never spawn anything.
    #[error("max_entities must be nonzero")]
    ZeroEntityCapacity,

    /// `max_components` was zero; no component type could be registered.
    #[error("max_components must be nonzero")]
    ZeroComponentCapacity,
}

//=== EcsError ============================================================

/// Failures produced by [`crate::core::ecs::World`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcsError {
    /// Spawning would exceed the configured `max_entities` limit.
    #[error("entity capacity exhausted ({capacity} entities)")]
    EntityCapacity {
        /// The configured entity limit.
        capacity: u32,
    },

    /// Registering another component type would exceed `max_components`.
    #[error("component capacity exhausted ({capacity} component types)")]
    ComponentCapacity {
        /// The configured component-type limit.
        capacity: u32,
    },

    /// The target entity is dead or the handle is stale.
    #[error("entity {index}v{generation} is not alive")]
    DeadEntity {
        /// Slot index of the offending handle.
        index: u32,
        /// Generation of the offending handle.
        generation: u32,
    },
}

//=== ResourceError =======================================================

/// Failures produced by [`crate::core::resource::ResourceManager`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// The handle refers to a slot that has since been freed and reused,
    /// or was never valid.
    #[error("stale resource handle (slot {slot})")]
    StaleHandle {
        /// Slot index of the offending handle.
        slot: u32,
    },
}

//=== ScheduleError =======================================================

/// Failures produced while building or compiling a
/// [`crate::core::schedule::TaskGraph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A dependency edge referenced a task id that was never added.
    #[error("unknown task id {0}")]
    UnknownTask(usize),

    /// A task was made to depend on itself.
    #[error("task '{0}' cannot depend on itself")]
    SelfDependency(String),

    /// The dependency edges form a cycle; no execution order exists.
    #[error("dependency cycle involving task '{0}'")]
    Cycle(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
