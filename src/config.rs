//=========================================================================
// Engine Configuration
//=========================================================================
//
// Caller-constructed, read-only input to engine initialization.
//
// The config is plain data: constructing one never fails, and any field
// combination is expressible. Validation happens at initialization time
// (`EngineConfig::validate`), which is the documented failure cause
// behind the facade's boolean init result.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::error::ConfigError;

//=== EngineConfig ========================================================

/// Engine initialization parameters.
///
/// Passed by value to [`crate::initialize_engine`] or
/// [`crate::Engine::new`]; the engine copies what it needs and never
/// mutates the caller's value.
///
/// # Examples
///
/// ```
/// use dfc_engine::EngineConfig;
///
/// let config = EngineConfig {
///     enable_validation: true,
///     enable_profiling: false,
///     max_entities: 1000,
///     max_components: 64,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Enables runtime validation of world operations. Misuse (stale
    /// entity handles, double inserts) is reported via `log::warn!`
    /// rather than failing silently through return values alone.
    pub enable_validation: bool,

    /// Enables per-frame profiling. When set, the engine records tick
    /// phase timings and logs a summary on shutdown.
    pub enable_profiling: bool,

    /// Upper bound on simultaneously live entities.
    pub max_entities: u32,

    /// Upper bound on distinct registered component types.
    pub max_components: u32,
}

impl EngineConfig {
    /// Checks that the capacity limits describe a usable engine.
    ///
    /// A zero entity or component capacity is rejected: such an engine
    /// could never hold any state and the limit is far more likely a
    /// caller bug than an intentional request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entities == 0 {
            return Err(ConfigError::ZeroEntityCapacity);
        }
        if self.max_components == 0 {
            return Err(ConfigError::ZeroComponentCapacity);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// Conservative defaults: validation and profiling off, room for
    /// 4096 entities across 128 component types.
    fn default() -> Self {
        Self {
            enable_validation: false,
            enable_profiling: false,
            max_entities: 4096,
            max_components: 128,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_entity_capacity_is_rejected() {
        let config = EngineConfig { max_entities: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroEntityCapacity));
    }

    #[test]
    fn zero_component_capacity_is_rejected() {
        let config = EngineConfig { max_components: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroComponentCapacity));
    }

    #[test]
    fn any_flag_combination_is_expressible() {
        for validation in [false, true] {
            for profiling in [false, true] {
                let config = EngineConfig {
                    enable_validation: validation,
                    enable_profiling: profiling,
                    max_entities: u32::MAX,
                    max_components: u32::MAX,
                };
                assert!(config.validate().is_ok());
            }
        }
    }
}
