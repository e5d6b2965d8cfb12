//=========================================================================
// DFC Engine — Library Root
//
// This crate defines the public API surface of the DFC game engine
// core: lifecycle, entity-component storage, resource management and
// task scheduling.
//
// Responsibilities:
// - Expose the owned engine context (`Engine`, `EngineBuilder`)
// - Expose the process-wide facade (`initialize_engine`, `tick_engine`,
//   `shutdown_engine`, `engine_version`) for hosts that need plain
//   functions with no state threading
// - Keep subsystem internals grouped under `core`
//
// Typical usage:
// ```no_run
// use dfc_engine::EngineBuilder;
//
// fn main() {
//     let mut engine = EngineBuilder::new().build().unwrap();
//     engine.tick(0.016);
//     engine.shutdown();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all internal engine systems (ECS, resources,
// scheduling, profiling). It is exposed publicly for engine-level
// extensibility, but normal application code will mostly use the
// top-level `Engine` facade.
//
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the owned engine context and its builder.
// `facade` wraps one process-wide instance behind free functions.
// `config` and `version` hold the plain data both surfaces share.
//
mod config;
mod engine;
mod facade;
mod version;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the lifecycle surface at the crate root so users can
// `use dfc_engine::Engine;` without knowing the module structure.
//
pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;
pub use facade::{
    engine_version, initialize_engine, is_initialized, shutdown_engine, tick_engine, with_engine,
};
pub use version::{EngineVersion, ENGINE_VERSION};
