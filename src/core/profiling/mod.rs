//=========================================================================
// Profiling
//=========================================================================
//
// Per-frame timing, gated by `EngineConfig::enable_profiling`. When the
// flag is off the engine carries no profiler at all.
//
//=========================================================================

mod profiler;

//=== Public Exports ======================================================

pub use profiler::{FrameProfiler, ProfileSummary};
