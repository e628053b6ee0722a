//! Fixed-size worker pool owned by one engine instance.
//!
//! Jobs travel over a shared crossbeam channel; each job carries its own
//! single-slot reply channel, so fan-in can await chunks in submission order
//! regardless of which worker finishes first.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use crossbeam::channel::{bounded, unbounded, Receiver, Sender};

use crate::compression::ChunkCodec;
use crate::engine::pipeline::{ChunkOp, ChunkOutcome};
use crate::types::StreamError;

/// One unit of work: a block plus where to send its result.
pub struct ChunkJob {
    pub index: usize,
    pub op: ChunkOp,
    pub codec: Arc<dyn ChunkCodec>,
    pub input: Bytes,
    reply: Sender<ChunkOutcome>,
}

/// Handle for a submitted job.
#[derive(Debug)]
pub struct PendingChunk {
    pub index: usize,
    rx: Receiver<ChunkOutcome>,
}

impl PendingChunk {
    /// Block until the job's result arrives.
    pub fn wait(self) -> Result<ChunkOutcome, StreamError> {
        self.rx
            .recv()
            .map_err(|_| StreamError::Pipeline("worker dropped a chunk result"))
    }
}

/// Single worker loop: runs until the job channel closes.
pub fn run_chunk_worker(rx: Receiver<ChunkJob>) {
    while let Ok(job) = rx.recv() {
        let outcome = job.op.run(job.index, job.codec.as_ref(), &job.input);
        // Receiver gone means the call already failed; discard.
        let _ = job.reply.send(outcome);
    }
}

#[derive(Debug)]
pub struct WorkerPool {
    tx: Option<Sender<ChunkJob>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, StreamError> {
        let (tx, rx) = unbounded::<ChunkJob>();
        let mut handles = Vec::with_capacity(workers.max(1));

        for i in 0..workers.max(1) {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("chunk-worker-{i}"))
                .spawn(move || run_chunk_worker(rx))?;
            handles.push(handle);
        }
        log::debug!("[POOL] started {} workers", handles.len());

        Ok(Self { tx: Some(tx), handles })
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    pub fn submit(
        &self,
        index: usize,
        op: ChunkOp,
        codec: Arc<dyn ChunkCodec>,
        input: Bytes,
    ) -> Result<PendingChunk, StreamError> {
        let (reply, rx) = bounded(1);
        let job = ChunkJob { index, op, codec, input, reply };
        self.tx
            .as_ref()
            .ok_or(StreamError::Pipeline("worker pool is shut down"))?
            .send(job)
            .map_err(|_| StreamError::Pipeline("worker pool rejected a job"))?;
        Ok(PendingChunk { index, rx })
    }

    /// Close the job channel and join every worker. Queued jobs still run.
    pub fn shutdown(&mut self) {
        self.tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
