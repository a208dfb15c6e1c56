//! Optional per-run instrumentation.
//!
//! An [`Instrumentation`] is passed explicitly into a conversion; there is no
//! process-wide timing state. Passing `None` skips all bookkeeping.

use std::fmt;
use std::time::{Duration, Instant};

/// Default duration above which a stage is reported as slow.
pub const DEFAULT_SLOW_STAGE: Duration = Duration::from_millis(50);

/// Pipeline stage being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preprocess,
    Plan,
    Analyze,
    Map,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Preprocess => "preprocess",
            Stage::Plan => "plan",
            Stage::Analyze => "analyze",
            Stage::Map => "map",
        };
        f.write_str(name)
    }
}

/// Wall-clock time spent in one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
}

/// Collects stage timings for a single conversion run.
#[derive(Debug, Clone)]
pub struct Instrumentation {
    slow_threshold: Duration,
    timings: Vec<StageTiming>,
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self::new(DEFAULT_SLOW_STAGE)
    }
}

impl Instrumentation {
    pub fn new(slow_threshold: Duration) -> Self {
        Self {
            slow_threshold,
            timings: Vec::new(),
        }
    }

    /// Run `f`, record how long it took and log it.
    ///
    /// Stages slower than the threshold are logged at warn level, the rest
    /// at debug.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        if elapsed > self.slow_threshold {
            log::warn!(
                "Stage {} took {:.2}ms (threshold {:.2}ms)",
                stage,
                elapsed.as_secs_f64() * 1000.0,
                self.slow_threshold.as_secs_f64() * 1000.0
            );
        } else {
            log::debug!("Stage {} completed in {:.2}ms", stage, elapsed.as_secs_f64() * 1000.0);
        }

        self.timings.push(StageTiming { stage, elapsed });
        result
    }

    pub fn timings(&self) -> &[StageTiming] {
        &self.timings
    }

    /// Total time across all recorded stages.
    pub fn total(&self) -> Duration {
        self.timings.iter().map(|t| t.elapsed).sum()
    }
}

/// Time `f` when a context is present, otherwise just run it.
pub(crate) fn timed<T>(
    ctx: &mut Option<&mut Instrumentation>,
    stage: Stage,
    f: impl FnOnce() -> T,
) -> T {
    match ctx {
        Some(inst) => inst.time(stage, f),
        None => f(),
    }
}
