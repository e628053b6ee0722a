//! Chunk fan-out / fan-in.
//!
//! Every block is submitted before any result is awaited; results are then
//! awaited in submission order. The serial path runs the same operation
//! inline and goes through the same aggregation, so both paths emit
//! identical bytes and identical errors.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;

use crate::compression::{ChunkCodec, CompressionError};
use crate::engine::parallelism::ParallelismProfile;
use crate::engine::pool::{PendingChunk, WorkerPool};
use crate::telemetry::{Stage, TelemetryCounters, TelemetryTimer};
use crate::types::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOp {
    Encode,
    Decode,
}

impl ChunkOp {
    pub fn apply(self, codec: &dyn ChunkCodec, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        match self {
            ChunkOp::Encode => codec.encode(input),
            ChunkOp::Decode => codec.decode(input),
        }
    }

    pub(crate) fn run(self, index: usize, codec: &dyn ChunkCodec, input: &[u8]) -> ChunkOutcome {
        ChunkOutcome { index, input_len: input.len(), result: self.apply(codec, input) }
    }

    /// Stage charged for fan-in time.
    pub fn stage(self) -> Stage {
        match self {
            ChunkOp::Encode => Stage::Compress,
            ChunkOp::Decode => Stage::Decompress,
        }
    }
}

/// Result of one chunk task, success or failure.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub index: usize,
    pub input_len: usize,
    pub result: Result<Vec<u8>, CompressionError>,
}

/// All outputs of a successful call, in input order.
#[derive(Debug, Default)]
pub struct ProcessedChunks {
    pub outputs: Vec<Vec<u8>>,
    pub counters: TelemetryCounters,
}

/// Engine instance. Owns its worker pool (if any) for its whole lifetime;
/// dropping the engine drains and joins the workers.
#[derive(Debug)]
pub struct ChunkEngine {
    profile: ParallelismProfile,
    pool: Option<WorkerPool>,
}

impl ChunkEngine {
    pub fn new(profile: ParallelismProfile) -> Result<Self, StreamError> {
        let pool = if profile.is_serial() {
            None
        } else {
            Some(WorkerPool::new(profile.worker_count())?)
        };
        Ok(Self { profile, pool })
    }

    pub fn profile(&self) -> ParallelismProfile {
        self.profile
    }

    /// Apply `op` to every block and return the outputs in input order.
    ///
    /// Fails atomically: on any chunk failure nothing is returned but the
    /// aggregated error. A failing input iterator aborts submission and its
    /// error is returned as-is.
    pub fn process_chunks<I>(
        &self,
        codec: &Arc<dyn ChunkCodec>,
        op: ChunkOp,
        blocks: I,
        timer: &mut TelemetryTimer,
    ) -> Result<ProcessedChunks, StreamError>
    where
        I: IntoIterator<Item = Result<Bytes, StreamError>>,
    {
        match &self.pool {
            Some(pool) => run_parallel(pool, codec, op, blocks, timer),
            None => run_serial(codec.as_ref(), op, blocks, timer),
        }
    }
}

fn run_parallel<I>(
    pool: &WorkerPool,
    codec: &Arc<dyn ChunkCodec>,
    op: ChunkOp,
    blocks: I,
    timer: &mut TelemetryTimer,
) -> Result<ProcessedChunks, StreamError>
where
    I: IntoIterator<Item = Result<Bytes, StreamError>>,
{
    let start = Instant::now();
    let mut pending: Vec<PendingChunk> = Vec::new();
    for (index, block) in blocks.into_iter().enumerate() {
        pending.push(pool.submit(index, op, codec.clone(), block?)?);
    }
    timer.add_stage_time(Stage::Split, start.elapsed());
    log::debug!("[PIPELINE] submitted {} chunks to {} workers", pending.len(), pool.worker_count());

    let start = Instant::now();
    let outcomes = pending.into_iter().map(PendingChunk::wait);
    let out = collect_outcomes(outcomes);
    timer.add_stage_time(op.stage(), start.elapsed());
    out
}

fn run_serial<I>(
    codec: &dyn ChunkCodec,
    op: ChunkOp,
    blocks: I,
    timer: &mut TelemetryTimer,
) -> Result<ProcessedChunks, StreamError>
where
    I: IntoIterator<Item = Result<Bytes, StreamError>>,
{
    let start = Instant::now();
    let inputs = blocks.into_iter().collect::<Result<Vec<Bytes>, _>>()?;
    timer.add_stage_time(Stage::Split, start.elapsed());
    log::debug!("[PIPELINE] running {} chunks inline", inputs.len());

    let start = Instant::now();
    let outcomes = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| Ok(op.run(index, codec, input)));
    let out = collect_outcomes(outcomes);
    timer.add_stage_time(op.stage(), start.elapsed());
    out
}

/// Fan-in. Walks every outcome so the failure count is exact, keeps the
/// first failure in submission order, and discards all outputs on failure.
fn collect_outcomes<I>(outcomes: I) -> Result<ProcessedChunks, StreamError>
where
    I: Iterator<Item = Result<ChunkOutcome, StreamError>>,
{
    let mut done = ProcessedChunks::default();
    let mut first: Option<(usize, CompressionError)> = None;
    let mut failed = 0usize;
    let mut total = 0usize;

    for outcome in outcomes {
        let outcome = outcome?;
        total += 1;
        match outcome.result {
            Ok(bytes) if first.is_none() => {
                done.counters.add_chunk(outcome.input_len, bytes.len());
                done.outputs.push(bytes);
            }
            Ok(_) => {}
            Err(e) => {
                failed += 1;
                if first.is_none() {
                    first = Some((outcome.index, e));
                    done.outputs.clear();
                }
            }
        }
    }

    match first {
        Some((index, source)) => Err(StreamError::ChunkFailed { index, failed, total, source }),
        None => {
            log::debug!("[PIPELINE] {} chunks done", total);
            Ok(done)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{create_codec, CompressionCodec};
    use crate::types::ErrorKind;

    fn blocks(data: &[Vec<u8>]) -> Vec<Result<Bytes, StreamError>> {
        data.iter().map(|b| Ok(Bytes::from(b.clone()))).collect()
    }

    #[test]
    fn serial_and_parallel_agree() {
        let codec = create_codec(CompressionCodec::Huffman, None);
        let data: Vec<Vec<u8>> = (0..10u8).map(|i| vec![i; 1000 * (i as usize + 1)]).collect();

        let serial = ChunkEngine::new(ParallelismProfile::single_threaded()).unwrap();
        let parallel = ChunkEngine::new(ParallelismProfile::fixed(3)).unwrap();

        let a = serial
            .process_chunks(&codec, ChunkOp::Encode, blocks(&data), &mut TelemetryTimer::new())
            .unwrap();
        let b = parallel
            .process_chunks(&codec, ChunkOp::Encode, blocks(&data), &mut TelemetryTimer::new())
            .unwrap();
        assert_eq!(a.outputs, b.outputs);
        assert_eq!(a.counters, b.counters);
        assert_eq!(a.counters.chunks, 10);
    }

    #[test]
    fn failures_are_aggregated_in_submission_order() {
        let codec = create_codec(CompressionCodec::Huffman, None);
        let good = codec.encode(b"hello").unwrap();
        let payloads = vec![good.clone(), vec![0xFF; 3], good, vec![0, 0, 0, 9]];

        for profile in [ParallelismProfile::single_threaded(), ParallelismProfile::fixed(4)] {
            let engine = ChunkEngine::new(profile).unwrap();
            let err = engine
                .process_chunks(&codec, ChunkOp::Decode, blocks(&payloads), &mut TelemetryTimer::new())
                .unwrap_err();
            match &err {
                StreamError::ChunkFailed { index, failed, total, .. } => {
                    assert_eq!((*index, *failed, *total), (1, 2, 4));
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(err.kind(), ErrorKind::CorruptChunk);
        }
    }

    #[test]
    fn input_error_aborts() {
        let codec = create_codec(CompressionCodec::Deflate, None);
        let engine = ChunkEngine::new(ParallelismProfile::fixed(2)).unwrap();
        let input = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(StreamError::from(std::io::Error::new(std::io::ErrorKind::Other, "gone"))),
        ];
        let err = engine
            .process_chunks(&codec, ChunkOp::Encode, input, &mut TelemetryTimer::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let codec = create_codec(CompressionCodec::Deflate, None);
        let engine = ChunkEngine::new(ParallelismProfile::fixed(2)).unwrap();
        let mut timer = TelemetryTimer::new();
        let out = engine
            .process_chunks(&codec, ChunkOp::Encode, Vec::new(), &mut timer)
            .unwrap();
        assert!(out.outputs.is_empty());
        assert_eq!(out.counters.chunks, 0);
        assert!(timer.stage_times.has_all(&[Stage::Split, Stage::Compress]));
    }
}
