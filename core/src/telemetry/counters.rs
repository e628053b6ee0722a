//! telemetry/counters.rs
//! Mutable counters used during one engine call.
//!
//! Converted into an immutable TelemetrySnapshot at pipeline end.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected during a compress/decompress call.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks: u64,
    /// Bytes handed to the codec (plaintext on compress, payloads on decompress).
    pub bytes_input: u64,
    /// Bytes produced by the codec.
    pub bytes_output: u64,
    /// Container framing: header plus per-chunk length prefixes.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record one processed chunk.
    pub fn add_chunk(&mut self, input_len: usize, output_len: usize) {
        self.chunks += 1;
        self.bytes_input += input_len as u64;
        self.bytes_output += output_len as u64;
    }

    pub fn add_overhead(&mut self, len: usize) {
        self.bytes_overhead += len as u64;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.chunks += other.chunks;
        self.bytes_input += other.bytes_input;
        self.bytes_output += other.bytes_output;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
