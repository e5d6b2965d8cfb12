//=========================================================================
// Process-Wide Facade
//=========================================================================
//
// Free-function surface over a single process-wide engine instance:
// version query, initialize, per-frame tick, shutdown.
//
// The implicit global the signatures demand is made explicit here as a
// mutex-guarded `Option<Engine>` with a documented lifecycle:
//
// - `initialize_engine` fills the slot; a second call while the slot is
//   occupied is rejected (returns false) rather than tearing down the
//   running instance.
// - `tick_engine` and `shutdown_engine` before initialization are
//   warned no-ops; neither signature carries an error channel.
// - `shutdown_engine` empties the slot, so init may be called again
//   afterwards.
//
// Applications embedding the engine directly should prefer the owned
// `Engine` context; this surface exists for hosts that need plain
// functions with no state threading.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Mutex, PoisonError};

//=== External Crates =====================================================

use log::{error, warn};

//=== Internal Modules ====================================================

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::version::{EngineVersion, ENGINE_VERSION};

//=========================================================================

static ENGINE: Mutex<Option<Engine>> = Mutex::new(None);

fn slot() -> std::sync::MutexGuard<'static, Option<Engine>> {
    // A panic mid-tick poisons the mutex; the engine state itself is
    // still coherent enough to shut down, so recover the guard.
    ENGINE.lock().unwrap_or_else(PoisonError::into_inner)
}

//=== Public API ==========================================================

/// Returns the engine's build version.
///
/// Callable at any time, initialized or not; the value is stable for
/// the lifetime of the process.
pub fn engine_version() -> EngineVersion {
    ENGINE_VERSION
}

/// Initializes the process-wide engine instance.
///
/// Returns `false` when the config fails validation or when an engine
/// is already running; the cause is logged at error level. On success
/// the instance serves all subsequent [`tick_engine`] calls until
/// [`shutdown_engine`].
pub fn initialize_engine(config: EngineConfig) -> bool {
    let mut slot = slot();
    if slot.is_some() {
        error!("initialize_engine rejected: engine already initialized");
        return false;
    }

    match Engine::new(config) {
        Ok(engine) => {
            *slot = Some(engine);
            true
        }
        Err(err) => {
            error!("initialize_engine failed: {err}");
            false
        }
    }
}

/// Advances the process-wide engine by `delta_time` seconds.
///
/// A warned no-op when no engine is initialized. Delta sanitization
/// (non-finite rejection, negative clamping) follows
/// [`Engine::tick`].
pub fn tick_engine(delta_time: f32) {
    match slot().as_mut() {
        Some(engine) => engine.tick(delta_time),
        None => warn!("tick_engine ignored: engine not initialized"),
    }
}

/// Shuts down the process-wide engine instance.
///
/// Idempotent: a call with no running engine is a warned no-op. After
/// shutdown, [`initialize_engine`] may be called again.
pub fn shutdown_engine() {
    match slot().take() {
        Some(engine) => engine.shutdown(),
        None => warn!("shutdown_engine ignored: engine not initialized"),
    }
}

/// True while a process-wide engine instance is running.
pub fn is_initialized() -> bool {
    slot().is_some()
}

/// Runs `f` against the process-wide engine, returning `None` when no
/// engine is initialized.
///
/// This is the escape hatch for facade users that need world or
/// resource access between ticks.
pub fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    slot().as_mut().map(f)
}
