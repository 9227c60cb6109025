//! Performance instrumentation.
//!
//! Scoped timers for the hot paths of the engine (CSV scanning, per-move
//! reorder computation, auto-scroll ticks), plus small statistics helpers
//! the layout manager uses to notice when reordering gets expensive.
//!
//! Enable detailed tracing with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! panelgrid = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn scan_rows() {
//!     profile_scope!("scan_rows");
//!     // ... work ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Budget for a single pointer-move computation (one frame at 60 FPS)
pub const POINTER_MOVE_BUDGET_MS: f64 = 16.67;

/// Passes kept in the statistics window
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Operation Statistics
// ============================================================================

/// Timings of the most recent passes of one operation.
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    window: VecDeque<f64>,
    window_sum: f64,
    count: u64,
    max_ms: f64,
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.window.len() == STATS_SAMPLE_COUNT {
            self.window_sum -= self.window.pop_front().unwrap_or_default();
        }
        self.window.push_back(ms);
        self.window_sum += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Mean of the retained window.
    pub fn average(&self) -> f64 {
        match self.window.len() {
            0 => 0.0,
            n => self.window_sum / n as f64,
        }
    }

    pub fn p95(&self) -> f64 {
        let mut sorted: Vec<f64> = self.window.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let rank = (sorted.len() * 95 / 100).min(sorted.len().saturating_sub(1));
        sorted.get(rank).copied().unwrap_or_default()
    }

    /// Passes recorded since creation, including those out of the window.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }
}

// ============================================================================
// Reorder Profiler
// ============================================================================

/// Tracks how many slots each reorder pass inspects and how long it takes.
#[derive(Debug, Clone, Default)]
pub struct ReorderProfiler {
    /// Slots inspected by the last pass
    pub slots_tested: usize,
    /// Duration of the last pass
    pub last_pass_ms: f64,
    avg_slots: f64,
    timings: OperationStats,
}

impl ReorderProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reorder pass.
    pub fn record(&mut self, slots_tested: usize, elapsed_ms: f64) {
        self.slots_tested = slots_tested;
        self.last_pass_ms = elapsed_ms;
        self.timings.record(elapsed_ms);

        let alpha = 0.1;
        self.avg_slots = self.avg_slots * (1.0 - alpha) + slots_tested as f64 * alpha;

        if elapsed_ms > POINTER_MOVE_BUDGET_MS {
            warn!(
                slots = slots_tested,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                budget_ms = format!("{:.2}", POINTER_MOVE_BUDGET_MS),
                "Reorder pass over frame budget"
            );
        }
    }

    pub fn passes(&self) -> u64 {
        self.timings.count()
    }

    /// Log a summary at debug level.
    pub fn log_summary(&self) {
        debug!(
            passes = self.timings.count(),
            avg_ms = format!("{:.3}", self.timings.average()),
            p95_ms = format!("{:.3}", self.timings.p95()),
            max_ms = format!("{:.3}", self.timings.max_ms()),
            avg_slots = format!("{:.1}", self.avg_slots),
            "Reorder timing"
        );
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs its duration on drop when over threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer for profiling builds (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run a closure and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
