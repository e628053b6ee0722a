/// Parallelism configuration for one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismProfile {
    worker_count: usize,
    inline: bool,
}

impl ParallelismProfile {
    /// Run every chunk inline on the calling thread; no pool is created.
    pub fn single_threaded() -> Self {
        Self { worker_count: 1, inline: true }
    }

    /// One pool worker per logical core.
    pub fn dynamic() -> Self {
        Self::fixed(num_cpus::get())
    }

    /// A pool of exactly `workers` threads (at least one).
    pub fn fixed(workers: usize) -> Self {
        Self { worker_count: workers.max(1), inline: false }
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[inline]
    pub fn is_serial(&self) -> bool {
        self.inline
    }
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::dynamic()
    }
}
