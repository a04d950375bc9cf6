//! Call orchestration: advisory hint, size classification, partitioning and
//! the concurrent per-partition fill.

use std::mem::size_of_val;
use std::num::NonZeroUsize;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, trace};

use crate::advise::{advise_huge_pages, AdviceError};
use crate::error::{invalid_worker_count, Result};
use crate::partition::split_partitions;
use crate::pool;
use crate::simd::{Backend, Kernels};
use crate::FAST_PATH_THRESHOLD;

/// Tunables of a fill. None of them change the resulting buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Number of partitions, and of threads filling them.
    pub workers: usize,
    /// Regions smaller than this many bytes skip the worker pool. Zero sends
    /// every region through the partitioned path.
    pub fast_path_threshold: usize,
    /// Whether to issue the huge-page hint before filling.
    pub huge_page_advice: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            fast_path_threshold: FAST_PATH_THRESHOLD,
            huge_page_advice: true,
        }
    }
}

impl FillOptions {
    /// Sets the number of partitions and worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the size in bytes below which the pool is skipped.
    pub fn with_fast_path_threshold(mut self, bytes: usize) -> Self {
        self.fast_path_threshold = bytes;
        self
    }

    /// Enables or disables the huge-page hint.
    pub fn with_huge_page_advice(mut self, enabled: bool) -> Self {
        self.huge_page_advice = enabled;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(invalid_worker_count(self.workers));
        }
        Ok(())
    }
}

/// A reusable fill configuration: options, resolved kernels and the worker
/// pool that runs the partitions.
///
/// The pool belongs to the `Filler` (or is an injected handle), never to the
/// process, so fillers with different worker counts can run side by side.
///
/// ```rust
/// use fastfill::{Backend, FillOptions, Filler};
///
/// let filler = Filler::new(FillOptions::default().with_workers(2))
///     .unwrap()
///     .with_backend(Backend::Scalar)
///     .unwrap();
///
/// let mut buf = vec![1u64; 1000];
/// filler.fill_words(&mut buf, 7);
/// assert!(buf.iter().all(|&w| w == 7));
/// ```
#[derive(Debug, Clone)]
pub struct Filler {
    options: FillOptions,
    kernels: Kernels,
    pool: Option<Arc<ThreadPool>>,
}

impl Filler {
    /// Creates a filler that owns a pool of `options.workers` threads.
    ///
    /// # Errors
    ///
    /// Fails when `options.workers` is zero or the pool cannot be started.
    pub fn new(options: FillOptions) -> Result<Self> {
        options.validate()?;

        let pool = match options.workers {
            1 => None,
            workers => Some(Arc::new(pool::build(workers)?)),
        };

        Ok(Self::assemble(options, pool))
    }

    /// Creates a filler that borrows the cached pool for `options.workers`
    /// from [`pool::shared`].
    ///
    /// # Errors
    ///
    /// Same as [`Filler::new`].
    pub fn shared(options: FillOptions) -> Result<Self> {
        options.validate()?;

        let pool = match options.workers {
            1 => None,
            workers => Some(pool::shared(workers)?),
        };

        Ok(Self::assemble(options, pool))
    }

    /// Creates a filler that runs its partitions on an injected pool.
    ///
    /// The buffer is still split into `options.workers` partitions whatever
    /// the size of `pool`.
    ///
    /// # Errors
    ///
    /// Fails when `options.workers` is zero.
    pub fn with_pool(options: FillOptions, pool: Arc<ThreadPool>) -> Result<Self> {
        options.validate()?;

        Ok(Self::assemble(options, Some(pool)))
    }

    fn assemble(options: FillOptions, pool: Option<Arc<ThreadPool>>) -> Self {
        Self {
            options,
            kernels: Kernels::detect(),
            pool,
        }
    }

    /// Replaces the detected kernels with those of `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::UnsupportedBackend`](crate::FillError::UnsupportedBackend)
    /// when the CPU cannot run `backend`.
    pub fn with_backend(mut self, backend: Backend) -> Result<Self> {
        self.kernels = Kernels::for_backend(backend)?;
        Ok(self)
    }

    /// Options this filler was built with.
    pub fn options(&self) -> &FillOptions {
        &self.options
    }

    /// Backend whose kernels fill the partitions.
    pub fn backend(&self) -> Backend {
        self.kernels.backend()
    }

    /// Fills every byte of `buf` with `value`.
    ///
    /// Returns once all partitions are written.
    pub fn fill_bytes(&self, buf: &mut [u8], value: u8) {
        let kernels = self.kernels;
        self.run(buf, value, move |chunk, value| kernels.fill_bytes(chunk, value));
    }

    /// Fills every element of `buf` with `value`.
    ///
    /// Returns once all partitions are written.
    pub fn fill_words(&self, buf: &mut [u64], value: u64) {
        let kernels = self.kernels;
        self.run(buf, value, move |chunk, value| kernels.fill_words(chunk, value));
    }

    fn run<T, F>(&self, buf: &mut [T], value: T, kernel: F)
    where
        T: Copy + Send + Sync,
        F: Fn(&mut [T], T) + Sync,
    {
        let bytes = size_of_val(buf);

        if self.options.huge_page_advice {
            note_advice(bytes, advise_huge_pages(&mut *buf));
        }

        if bytes < self.options.fast_path_threshold {
            trace!(bytes, path = "fast", "fill");
            buf.fill(value);
            return;
        }

        let workers = self.options.workers;
        trace!(bytes, workers, backend = %self.backend(), path = "parallel", "fill");

        let chunks = split_partitions(buf, workers);

        match &self.pool {
            Some(pool) if chunks.len() > 1 => pool.install(|| {
                chunks
                    .into_par_iter()
                    .with_max_len(1)
                    .for_each(|chunk| kernel(chunk, value));
            }),
            _ => chunks.into_iter().for_each(|chunk| kernel(chunk, value)),
        }
    }
}

/// Logs the outcome of the huge-page hint and reports whether it was applied.
/// A refused hint never stops the fill.
fn note_advice(bytes: usize, outcome: std::result::Result<(), AdviceError>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(AdviceError::Unsupported) => {
            trace!("huge page advice unavailable");
            false
        }
        Err(err) => {
            debug!(bytes, error = %err, "huge page advice ignored");
            false
        }
    }
}
