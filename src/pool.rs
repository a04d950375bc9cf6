//! Worker pools sized per call.
//!
//! A fill never touches rayon's global pool or any process-wide thread-count
//! setting. [`build`] creates a pool owned by one [`Filler`](crate::Filler);
//! [`shared`] hands out cached pools keyed by worker count, so that callers
//! asking for different counts never share or resize each other's pool.
//!
//! The cache holds at most [`MAX_SHARED_POOLS`] pools. Asking for another
//! count evicts the least recently used one; its threads exit once the last
//! [`Filler`](crate::Filler) holding it is dropped.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{invalid_worker_count, Result};

/// Number of pools [`shared`] keeps alive at once.
pub const MAX_SHARED_POOLS: usize = 4;

static POOLS: OnceLock<Mutex<PoolCache>> = OnceLock::new();

/// Builds a dedicated pool with exactly `workers` threads.
///
/// # Errors
///
/// Fails when `workers` is zero or the threads cannot be spawned.
pub fn build(workers: usize) -> Result<ThreadPool> {
    if workers == 0 {
        return Err(invalid_worker_count(workers));
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("fastfill-{index}"))
        .build()?;

    debug!(workers, "fill worker pool started");

    Ok(pool)
}

/// Returns the cached pool with exactly `workers` threads, starting it on
/// first use.
///
/// # Errors
///
/// Same as [`build`].
pub fn shared(workers: usize) -> Result<Arc<ThreadPool>> {
    let pools = POOLS.get_or_init(|| Mutex::new(PoolCache::new(MAX_SHARED_POOLS)));
    // The cache stays consistent even if a holder panicked.
    let mut pools = pools.lock().unwrap_or_else(PoisonError::into_inner);

    pools.get_or_build(workers)
}

/// Least-recently-used set of pools keyed by worker count.
struct PoolCache {
    capacity: usize,
    // Least recently used first.
    entries: Vec<(usize, Arc<ThreadPool>)>,
}

impl PoolCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    fn get_or_build(&mut self, workers: usize) -> Result<Arc<ThreadPool>> {
        if let Some(index) = self.entries.iter().position(|(count, _)| *count == workers) {
            let entry = self.entries.remove(index);
            let pool = Arc::clone(&entry.1);
            self.entries.push(entry);
            return Ok(pool);
        }

        let pool = Arc::new(build(workers)?);
        self.entries.push((workers, Arc::clone(&pool)));

        if self.entries.len() > self.capacity {
            let (evicted, _) = self.entries.remove(0);
            debug!(workers = evicted, "fill worker pool evicted");
        }

        Ok(pool)
    }

    #[cfg(test)]
    fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(count, _)| *count).collect()
    }
}
