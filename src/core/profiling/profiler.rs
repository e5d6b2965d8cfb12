//=========================================================================
// Frame Profiler
//=========================================================================
//
// Lightweight per-frame timing, enabled by `EngineConfig::enable_profiling`.
//
// The engine brackets each tick with `begin_frame`/`end_frame` and
// records named phase durations in between. The profiler keeps a
// rolling window of recent frame times plus lifetime aggregates, and
// renders a summary that the engine logs on shutdown.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

//=== ProfileSummary ======================================================

/// Aggregated timing over the profiler's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    /// Total completed frames.
    pub frames: u64,
    /// Mean frame duration over the rolling window.
    pub recent_average: Duration,
    /// Worst frame duration ever observed.
    pub worst_frame: Duration,
    /// Lifetime time spent per named phase, sorted by phase name.
    pub phases: Vec<(String, Duration)>,
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frame(s), recent avg {:.3} ms, worst {:.3} ms",
            self.frames,
            self.recent_average.as_secs_f64() * 1000.0,
            self.worst_frame.as_secs_f64() * 1000.0,
        )?;
        for (name, total) in &self.phases {
            write!(f, ", {} {:.3} ms", name, total.as_secs_f64() * 1000.0)?;
        }
        Ok(())
    }
}

//=== FrameProfiler =======================================================

/// Records tick timings for a single engine instance.
pub struct FrameProfiler {
    window: VecDeque<Duration>,
    window_capacity: usize,
    frames: u64,
    worst_frame: Duration,
    phase_totals: HashMap<&'static str, Duration>,
    frame_start: Option<Instant>,
}

impl FrameProfiler {
    /// Frames kept in the rolling average window.
    pub const DEFAULT_WINDOW: usize = 120;

    /// Creates a profiler with the default window size.
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Creates a profiler averaging over the last `window` frames.
    pub fn with_window(window: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(window.max(1)),
            window_capacity: window.max(1),
            frames: 0,
            worst_frame: Duration::ZERO,
            phase_totals: HashMap::new(),
            frame_start: None,
        }
    }

    /// Marks the start of a frame. An unfinished previous frame is
    /// discarded.
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Adds `duration` to the lifetime total of a named phase.
    pub fn record_phase(&mut self, name: &'static str, duration: Duration) {
        *self.phase_totals.entry(name).or_insert(Duration::ZERO) += duration;
    }

    /// Closes the frame opened by [`begin_frame`](Self::begin_frame)
    /// and returns its wall duration. Without a matching begin this is
    /// a no-op returning zero.
    pub fn end_frame(&mut self) -> Duration {
        let Some(start) = self.frame_start.take() else {
            return Duration::ZERO;
        };
        let duration = start.elapsed();

        if self.window.len() == self.window_capacity {
            self.window.pop_front();
        }
        self.window.push_back(duration);
        self.frames += 1;
        self.worst_frame = self.worst_frame.max(duration);
        duration
    }

    /// Total completed frames.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Snapshot of the aggregated timings.
    pub fn summary(&self) -> ProfileSummary {
        let recent_average = if self.window.is_empty() {
            Duration::ZERO
        } else {
            self.window.iter().sum::<Duration>() / self.window.len() as u32
        };

        let mut phases: Vec<(String, Duration)> = self
            .phase_totals
            .iter()
            .map(|(name, total)| (name.to_string(), *total))
            .collect();
        phases.sort_by(|a, b| a.0.cmp(&b.0));

        ProfileSummary {
            frames: self.frames,
            recent_average,
            worst_frame: self.worst_frame,
            phases,
        }
    }
}

impl Default for FrameProfiler {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
