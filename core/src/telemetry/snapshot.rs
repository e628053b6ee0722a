use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Immutable per-call snapshot: counters, ratio, throughput, stage timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub chunks: u64,
    pub bytes_input: u64,
    pub bytes_output: u64,
    pub bytes_overhead: u64,
    /// `bytes_output / bytes_input`; above 1.0 when coding expands the data.
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_input > 0 {
            counters.bytes_output as f64 / counters.bytes_input as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_input as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            chunks: counters.chunks,
            bytes_input: counters.bytes_input,
            bytes_output: counters.bytes_output,
            bytes_overhead: counters.bytes_overhead,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Stage times are measured inside the call, so they never exceed it.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
