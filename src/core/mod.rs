//=========================================================================
// Core Subsystems
//=========================================================================
//
// Internal engine systems, each owned directly by `Engine`:
//
// - `ecs`       — entity-component storage and deferred commands
// - `resource`  — reference-counted resource management
// - `schedule`  — the per-frame task graph and its executor
// - `profiling` — optional frame timing
//
// Exposed publicly for engine-level extensibility; application code
// mostly reaches these through the `Engine` facade and the prelude.
//
//=========================================================================

pub mod ecs;
pub mod profiling;
pub mod resource;
pub mod schedule;
