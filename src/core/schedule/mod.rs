//=========================================================================
// Task Scheduling
//=========================================================================
//
// Explicit task graph with dependency edges, compiled into sequential
// waves of concurrently runnable tasks.
//
// Module layout:
// - `task`     — the `Task` trait and per-frame `TickContext`
// - `graph`    — graph building and wave compilation
// - `executor` — wave execution and command synchronization
//
//=========================================================================

mod executor;
mod graph;
mod task;

//=== Public Exports ======================================================

pub use graph::{Schedule, TaskGraph, TaskId};
pub use task::{Task, TickContext};
