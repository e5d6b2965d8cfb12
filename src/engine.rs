//=========================================================================
// Engine
//=========================================================================
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder ──build()──> Engine ──tick(dt)──> [Schedule waves]
//         │                        │
//         ├─ with_max_entities()   ├─ World            (ECS storage)
//         ├─ with_max_components() ├─ ResourceManager  (refcounted)
//         ├─ with_validation()     ├─ Schedule         (task graph)
//         └─ with_profiling()      └─ FrameProfiler    (optional)
// ```
//
// The engine is an owned context: every subsystem hangs off one value
// that the caller threads through `tick` calls and finally consumes
// with `shutdown`. The process-wide facade in `facade.rs` wraps exactly
// this type.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::ecs::World;
use crate::core::profiling::{FrameProfiler, ProfileSummary};
use crate::core::resource::ResourceManager;
use crate::core::schedule::{Schedule, TaskGraph, TickContext};
use crate::error::EngineError;
use crate::version::ENGINE_VERSION;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Starts from [`EngineConfig::default`] and overrides field by field.
///
/// # Examples
///
/// ```
/// use dfc_engine::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_max_entities(1000)
///     .with_max_components(64)
///     .with_validation(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.config().max_entities, 1000);
/// ```
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self { config: EngineConfig::default() }
    }

    /// Starts from an existing config instead of the defaults.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggles runtime validation of world operations.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.config.enable_validation = enabled;
        self
    }

    /// Toggles per-frame profiling.
    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.config.enable_profiling = enabled;
        self
    }

    /// Sets the live-entity capacity limit.
    pub fn with_max_entities(mut self, max_entities: u32) -> Self {
        self.config.max_entities = max_entities;
        self
    }

    /// Sets the registered-component-type capacity limit.
    pub fn with_max_components(mut self, max_components: u32) -> Self {
        self.config.max_components = max_components;
        self
    }

    /// Validates the config and constructs the engine.
    pub fn build(self) -> Result<Engine, EngineError> {
        Engine::new(self.config)
    }
}

//=== Engine ==============================================================

/// Owned engine context: ECS world, resource manager, task schedule and
/// optional profiler behind one value.
///
/// # Lifecycle
///
/// 1. [`Engine::new`] (or [`EngineBuilder`]) validates the config and
///    builds every subsystem.
/// 2. [`Engine::install_schedule`] compiles a task graph into the
///    frame schedule.
/// 3. [`Engine::tick`] advances the simulation one frame at a time.
/// 4. [`Engine::shutdown`] consumes the engine, releasing all entities
///    and resources and logging the profiling summary when enabled.
///
/// # Examples
///
/// ```
/// use dfc_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig::default()).unwrap();
/// engine.tick(0.016);
/// assert_eq!(engine.frame(), 1);
/// engine.shutdown();
/// ```
pub struct Engine {
    config: EngineConfig,
    world: World,
    resources: ResourceManager,
    schedule: Option<Schedule>,
    profiler: Option<FrameProfiler>,
    frame: u64,
    elapsed: f64,
}

impl Engine {
    //--- Construction -----------------------------------------------------

    /// Builds an engine from a validated config.
    ///
    /// Fails with [`EngineError::InvalidConfig`] when the config's
    /// capacity limits are unusable; this is the failure behind the
    /// facade's boolean init result.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        info!(
            "engine {} initializing (validation: {}, profiling: {}, max_entities: {}, max_components: {})",
            ENGINE_VERSION,
            config.enable_validation,
            config.enable_profiling,
            config.max_entities,
            config.max_components
        );

        Ok(Self {
            world: World::new(&config),
            resources: ResourceManager::new(),
            schedule: None,
            profiler: config.enable_profiling.then(FrameProfiler::new),
            frame: 0,
            elapsed: 0.0,
            config,
        })
    }

    //--- Configuration ----------------------------------------------------

    /// The config this engine was built with.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compiles `graph` and installs it as the frame schedule,
    /// replacing any previous one.
    pub fn install_schedule(&mut self, graph: TaskGraph) -> Result<(), EngineError> {
        let schedule = graph.compile()?;
        info!(
            "schedule installed: {} task(s) in {} wave(s)",
            schedule.task_count(),
            schedule.wave_count()
        );
        self.schedule = Some(schedule);
        Ok(())
    }

    /// The installed schedule, if any.
    #[inline]
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    //--- Subsystem access -------------------------------------------------

    /// Shared access to entity-component storage.
    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to entity-component storage.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Shared access to the resource manager.
    #[inline]
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Mutable access to the resource manager.
    #[inline]
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    //--- Frame clock ------------------------------------------------------

    /// Completed frames since initialization.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Accumulated simulation seconds since initialization.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    //--- Execution --------------------------------------------------------

    /// Advances the simulation by `delta_time` seconds.
    ///
    /// Delta handling:
    /// - Non-finite values (NaN, ±inf) cannot advance a clock; the tick
    ///   is skipped with a warning.
    /// - Negative values are clamped to zero. The frame still runs, so
    ///   callers feeding a jittery clock keep a monotonic frame count.
    pub fn tick(&mut self, delta_time: f32) {
        if !delta_time.is_finite() {
            warn!("tick skipped: non-finite delta_time ({delta_time})");
            return;
        }
        let delta_time = if delta_time < 0.0 {
            debug!("negative delta_time ({delta_time}) clamped to zero");
            0.0
        } else {
            delta_time
        };

        if let Some(profiler) = &mut self.profiler {
            profiler.begin_frame();
        }

        let ctx = TickContext {
            delta_time,
            frame: self.frame,
            elapsed: self.elapsed,
        };

        if let Some(schedule) = &self.schedule {
            let started = Instant::now();
            schedule.run(&mut self.world, &ctx);
            if let Some(profiler) = &mut self.profiler {
                profiler.record_phase("schedule", started.elapsed());
            }
        }

        self.frame += 1;
        self.elapsed += f64::from(delta_time);

        if let Some(profiler) = &mut self.profiler {
            profiler.end_frame();
        }
    }

    /// Profiling aggregates so far, when profiling is enabled.
    pub fn profile_summary(&self) -> Option<ProfileSummary> {
        self.profiler.as_ref().map(FrameProfiler::summary)
    }

    //--- Teardown ---------------------------------------------------------

    /// Shuts the engine down, consuming it.
    ///
    /// Entities and resources are dropped; leaked resource references
    /// are reported by the resource manager. With profiling enabled the
    /// timing summary is logged at info level.
    pub fn shutdown(mut self) {
        info!("engine shutting down after {} frame(s)", self.frame);

        if let Some(profiler) = &self.profiler {
            info!("profile: {}", profiler.summary());
        }

        self.world.clear();
        self.resources.clear();
        info!("engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
