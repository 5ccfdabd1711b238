//! Performance instrumentation for the pointer-move hot paths.
//!
//! Hover classification and drag previews run on every pointer move, so
//! they are wrapped in `profile_scope!`. With the `profiling` feature off the
//! macro compiles to nothing.
//!
//! ```ignore
//! fn update_hover() {
//!     profile_scope!("update_hover", 2.0);  // warn above 2ms
//!     // ... work ...
//! }
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{trace, warn};

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

/// Global flag to enable/disable recording at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

thread_local! {
    static OPERATION_STATS: RefCell<HashMap<&'static str, OperationStats>> =
        RefCell::new(HashMap::new());
}

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

/// Enable or disable recording at runtime.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

// ============================================================================
// Operation Statistics
// ============================================================================

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    count: u64,
    min_ms: f64,
    max_ms: f64,
    /// Running sum over `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average over the retained samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }
}

/// Record a sample for `name` on this thread.
pub fn record_operation(name: &'static str, ms: f64) {
    OPERATION_STATS.with(|stats| stats.borrow_mut().entry(name).or_default().record(ms));
}

/// Snapshot of this thread's statistics for `name`.
pub fn operation_stats(name: &str) -> Option<OperationStats> {
    OPERATION_STATS.with(|stats| stats.borrow().get(name).cloned())
}

pub fn reset_operation_stats() {
    OPERATION_STATS.with(|stats| stats.borrow_mut().clear());
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// RAII timer: records on drop and warns when over its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer for profiling (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        if is_profiling_enabled() {
            record_operation(self.name, elapsed_ms);
            trace!("[PERF] {}: {:.3}ms", self.name, elapsed_ms);
        }

        if elapsed_ms > self.threshold_ms {
            warn!(
                "{} took {:.2}ms (threshold {:.2}ms)",
                self.name, elapsed_ms, self.threshold_ms
            );
        }
    }
}
