// ## 2️⃣ `core.rs`: stable public API

use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::compression::{create_codec, CompressionCodec, DEFAULT_LEVEL_DEFLATE};
use crate::constants::{CHUNK_SIZE, DEFAULT_FILENAME, MAX_CHUNK_SIZE};
use crate::container::{decode_container, encode_container, CompressedChunk, ContainerHeader};
use crate::engine::io::{deliver, open_input, read_all, Delivery, InputSource, OutputSink};
use crate::engine::parallelism::ParallelismProfile;
use crate::engine::pipeline::{ChunkEngine, ChunkOp};
use crate::engine::segmenting::ChunkSplitter;
use crate::telemetry::{Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::StreamError;
use crate::utils::{chunks_to_plaintext, compressed_filename};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressParams {
    pub filename: String,
    pub algorithm: CompressionCodec,
    /// Deflate only, 0..=9; `None` means the default level.
    pub deflate_level: Option<u32>,
}

impl CompressParams {
    pub fn new(filename: impl Into<String>, algorithm: CompressionCodec) -> Self {
        Self { filename: filename.into(), algorithm, deflate_level: None }
    }

    pub fn with_deflate_level(mut self, level: u32) -> Self {
        self.deflate_level = Some(level);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    pub profile: ParallelismProfile,
    /// Block size for splitting. `0` selects [`CHUNK_SIZE`]; larger values
    /// are capped at [`MAX_CHUNK_SIZE`].
    pub chunk_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { profile: ParallelismProfile::dynamic(), chunk_size: CHUNK_SIZE }
    }
}

impl ApiConfig {
    pub fn new(profile: ParallelismProfile) -> Self {
        Self { profile, ..Self::default() }
    }

    pub fn serial() -> Self {
        Self::new(ParallelismProfile::single_threaded())
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn effective_chunk_size(&self) -> usize {
        match self.chunk_size {
            0 => CHUNK_SIZE,
            n => n.min(MAX_CHUNK_SIZE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompressOutput {
    pub container: Vec<u8>,
    pub telemetry: TelemetrySnapshot,
}

#[derive(Debug, Clone)]
pub struct DecompressOutput {
    pub filename: String,
    pub data: Vec<u8>,
    pub telemetry: TelemetrySnapshot,
}

/// Result of a stream call.
#[derive(Debug, Clone)]
pub struct StreamReport {
    /// Filename stored in (compress) or read from (decompress) the container.
    pub filename: String,
    /// Set when the sink was a file or directory.
    pub path: Option<PathBuf>,
    /// Set when the sink was [`OutputSink::Memory`].
    pub output: Option<Vec<u8>>,
    pub telemetry: TelemetrySnapshot,
}

/// Compress a stream into container bytes using all cores.
pub fn compress<R: Read>(input: R, filename: &str, algorithm: CompressionCodec) -> Result<Vec<u8>, StreamError> {
    let params = CompressParams::new(filename, algorithm);
    Ok(compress_with(input, &params, &ApiConfig::default())?.container)
}

/// Single-threaded variant of [`compress`]; output is byte-identical.
pub fn compress_sync<R: Read>(input: R, filename: &str, algorithm: CompressionCodec) -> Result<Vec<u8>, StreamError> {
    let params = CompressParams::new(filename, algorithm);
    Ok(compress_with(input, &params, &ApiConfig::serial())?.container)
}

/// Decode container bytes into `(filename, original bytes)`.
pub fn decompress(container: &[u8]) -> Result<(String, Vec<u8>), StreamError> {
    let out = decompress_with(Bytes::copy_from_slice(container), &ApiConfig::default())?;
    Ok((out.filename, out.data))
}

pub fn decompress_sync(container: &[u8]) -> Result<(String, Vec<u8>), StreamError> {
    let out = decompress_with(Bytes::copy_from_slice(container), &ApiConfig::serial())?;
    Ok((out.filename, out.data))
}

pub fn compress_with<R: Read>(
    input: R,
    params: &CompressParams,
    config: &ApiConfig,
) -> Result<CompressOutput, StreamError> {
    let mut timer = TelemetryTimer::new();
    log::debug!(
        "[PIPELINE] compress {:?} with {} ({} workers)",
        params.filename,
        params.algorithm,
        config.profile.worker_count()
    );

    let level = match params.algorithm {
        CompressionCodec::Deflate => Some(params.deflate_level.unwrap_or(DEFAULT_LEVEL_DEFLATE)),
        CompressionCodec::Huffman => None,
    };
    let codec = create_codec(params.algorithm, level);
    let engine = ChunkEngine::new(config.profile)?;

    let blocks = ChunkSplitter::with_chunk_size(input, config.effective_chunk_size())
        .map(|b| b.map_err(StreamError::from));
    let mut done = engine.process_chunks(&codec, ChunkOp::Encode, blocks, &mut timer)?;
    drop(engine);

    let container = timer.time(Stage::Encode, || {
        encode_container(params.algorithm, &params.filename, &done.outputs)
    })?;

    let header = ContainerHeader { algorithm: params.algorithm, filename: params.filename.clone() };
    done.counters.add_overhead(header.encoded_len() + done.outputs.len() * CompressedChunk::LEN_PREFIX);

    timer.finish();
    Ok(CompressOutput { container, telemetry: TelemetrySnapshot::from(&done.counters, &timer) })
}

/// Decode a whole container. Chunk payloads stay zero-copy slices of `container`.
pub fn decompress_with(container: impl Into<Bytes>, config: &ApiConfig) -> Result<DecompressOutput, StreamError> {
    let mut timer = TelemetryTimer::new();
    let wire: Bytes = container.into();

    let parsed = timer.time(Stage::Decode, || decode_container(wire))?;
    log::debug!(
        "[PIPELINE] decompress {:?}: {} chunks of {}",
        parsed.filename(),
        parsed.chunks.len(),
        parsed.algorithm()
    );

    let codec = create_codec(parsed.algorithm(), None);
    let engine = ChunkEngine::new(config.profile)?;
    let blocks = parsed.chunks.iter().map(|c| Ok(c.payload.clone()));
    let mut done = engine.process_chunks(&codec, ChunkOp::Decode, blocks, &mut timer)?;
    drop(engine);

    done.counters.add_overhead(parsed.encoded_len() - parsed.payload_len());
    let data = chunks_to_plaintext(&done.outputs);

    timer.finish();
    Ok(DecompressOutput {
        filename: parsed.header.filename,
        data,
        telemetry: TelemetrySnapshot::from(&done.counters, &timer),
    })
}

/// Compress from any source into any sink. The sink is touched only after
/// the container is complete.
pub fn compress_stream(
    input: InputSource,
    output: OutputSink,
    params: &CompressParams,
    config: &ApiConfig,
) -> Result<StreamReport, StreamError> {
    let mut timer = TelemetryTimer::new();
    let reader = timer.time(Stage::Read, || open_input(input))?;
    let out = compress_with(reader, params, config)?;

    let delivery = timer.time(Stage::Write, || {
        deliver(output, &compressed_filename(&params.filename), out.container)
    })?;
    Ok(finish_report(params.filename.clone(), delivery, out.telemetry, timer))
}

/// Decompress from any source into any sink; a directory sink receives the
/// stored filename (its final path component only).
pub fn decompress_stream(
    input: InputSource,
    output: OutputSink,
    config: &ApiConfig,
) -> Result<StreamReport, StreamError> {
    let mut timer = TelemetryTimer::new();
    let wire = timer.time(Stage::Read, || read_all(input))?;
    let out = decompress_with(wire, config)?;

    let name = output_name(&out.filename);
    let delivery = timer.time(Stage::Write, || deliver(output, &name, out.data))?;
    Ok(finish_report(out.filename, delivery, out.telemetry, timer))
}

fn finish_report(
    filename: String,
    delivery: Delivery,
    mut telemetry: TelemetrySnapshot,
    outer: TelemetryTimer,
) -> StreamReport {
    for (stage, dur) in &outer.stage_times {
        telemetry.stage_times.add(*stage, *dur);
    }
    telemetry.elapsed = outer.elapsed();
    StreamReport {
        filename,
        path: delivery.path().map(Path::to_path_buf),
        output: delivery.into_bytes(),
        telemetry,
    }
}

// Stored names may carry directories or be blank; only the last component
// is ever written to disk.
fn output_name(stored: &str) -> String {
    Path::new(stored)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}
