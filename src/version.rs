//=========================================================================
// Engine Version
//=========================================================================
//
// Static build-version descriptor. The triple is baked in at compile
// time and must stay in lockstep with `Cargo.toml` (a test enforces
// this), so version reporting is stable for the lifetime of the process.
//
//=========================================================================

use std::fmt;

//=== EngineVersion =======================================================

/// Semantic version triple identifying this engine build.
///
/// Returned by value from [`crate::engine_version`]; two calls with no
/// intervening rebuild always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineVersion {
    /// Incompatible API changes.
    pub major: u32,
    /// Backwards-compatible additions.
    pub minor: u32,
    /// Backwards-compatible fixes.
    pub patch: u32,
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The version of this build.
pub const ENGINE_VERSION: EngineVersion = EngineVersion {
    major: 0,
    minor: 1,
    patch: 0,
};

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_constant_matches_cargo_manifest() {
        let manifest = env!("CARGO_PKG_VERSION");
        let rendered = ENGINE_VERSION.to_string();
        assert_eq!(rendered, manifest);
    }

    #[test]
    fn version_is_stable_across_reads() {
        let first = ENGINE_VERSION;
        let second = ENGINE_VERSION;
        assert_eq!(first, second);
    }

    #[test]
    fn display_renders_dotted_triple() {
        let v = EngineVersion { major: 2, minor: 14, patch: 3 };
        assert_eq!(v.to_string(), "2.14.3");
    }
}
