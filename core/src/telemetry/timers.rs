//! telemetry/timers.rs
//! Wall-clock accounting per engine stage.

use std::collections::{btree_map, BTreeMap};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Phases of a compress or decompress call that get timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Opening or draining the input source.
    Read,
    /// Cutting input into blocks and submitting them.
    Split,
    /// Fan-in of encode results.
    Compress,
    /// Fan-in of decode results.
    Decompress,
    /// Container assembly.
    Encode,
    /// Container parsing.
    Decode,
    /// Delivery to the sink.
    Write,
}

/// Accumulated time per stage. A stage is "recorded" once anything was
/// charged to it, even a zero duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: BTreeMap<Stage, Duration>,
}

impl StageTimes {
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_default() += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Duration {
        self.times.values().sum()
    }

    /// True when every stage in `expected` has been recorded.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = btree_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Call-scoped clock: overall elapsed time plus per-stage charges.
#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    started: Instant,
    finished: Option<Instant>,
    pub stage_times: StageTimes,
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self { started: Instant::now(), finished: None, stage_times: StageTimes::default() }
    }

    /// Freeze `elapsed()` at the current instant.
    pub fn finish(&mut self) {
        self.finished = Some(Instant::now());
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f`, charging its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.stage_times.add(stage, start.elapsed());
        out
    }

    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(Instant::now).duration_since(self.started)
    }
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}
