//=========================================================================
// Tasks
//=========================================================================
//
// A task is one unit of per-frame work. Tasks read the world and the
// tick context, and queue structural changes into a command buffer that
// the executor applies at the next synchronization point. Keeping the
// world immutable during execution is what lets one wave's tasks run
// on worker threads at the same time.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::ecs::{CommandBuffer, World};

//=== TickContext =========================================================

/// Per-frame timing information handed to every task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Seconds advanced this frame. Never negative or non-finite; the
    /// engine sanitizes the caller-supplied delta before scheduling.
    pub delta_time: f32,

    /// Index of the frame being executed, starting at 0.
    pub frame: u64,

    /// Total simulation seconds accumulated before this frame.
    pub elapsed: f64,
}

//=== Task ================================================================

/// One schedulable unit of frame work.
///
/// Implementations must be `Send + Sync`: tasks in the same schedule
/// wave may execute concurrently on worker threads.
///
/// # Examples
///
/// ```
/// use dfc_engine::core::ecs::{CommandBuffer, World};
/// use dfc_engine::core::schedule::{Task, TickContext};
///
/// struct Lifetime { remaining: f32 }
///
/// struct ExpireLifetimes;
///
/// impl Task for ExpireLifetimes {
///     fn run(&self, world: &World, ctx: &TickContext, commands: &mut CommandBuffer) {
///         for (entity, lifetime) in world.query::<Lifetime>() {
///             if lifetime.remaining <= ctx.delta_time {
///                 commands.despawn(entity);
///             }
///         }
///     }
/// }
/// ```
pub trait Task: Send + Sync {
    /// Executes the task against the current frame's world state.
    fn run(&self, world: &World, ctx: &TickContext, commands: &mut CommandBuffer);
}

// Closures make fine tasks for small systems and tests.
impl<F> Task for F
where
    F: Fn(&World, &TickContext, &mut CommandBuffer) + Send + Sync,
{
    fn run(&self, world: &World, ctx: &TickContext, commands: &mut CommandBuffer) {
        self(world, ctx, commands)
    }
}
