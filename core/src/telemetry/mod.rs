//! telemetry/mod.rs
//! Counters, timers, and immutable snapshots for engine calls.
//!
//! - Counters are accumulated on the fan-in thread only; workers never touch them.
//! - Snapshots are immutable and serializable.

pub mod counters;
pub mod snapshot;
pub mod timers;

pub use counters::*;
pub use snapshot::*;
pub use timers::*;
