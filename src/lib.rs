//! Parallel, SIMD-accelerated memory fill.
//!
//! `fastfill` writes a repeating pattern (one byte, or one 64-bit word) across
//! a large memory region at close to peak memory bandwidth. It is meant to be
//! called by a system that owns big shared buffers and needs to pre-fill or
//! reset them quickly.
//!
//! A call goes through the same stages regardless of the entry point:
//!
//! 1. a best-effort huge-page hint for the region ([`advise_huge_pages`]),
//! 2. a single-threaded `slice::fill` when the region is smaller than
//!    [`FAST_PATH_THRESHOLD`],
//! 3. otherwise a split into one contiguous [`Partition`] per worker, each of
//!    which is filled concurrently: scalar prefix up to the vector alignment,
//!    unrolled vector stores with a software prefetch, scalar tail.
//!
//! The vector kernel is picked once per process from the widest instruction
//! set the CPU reports (see [`Backend`]).
//!
//! # Usage
//!
//! ```rust
//! use fastfill::{FillOptions, Filler};
//!
//! let filler = Filler::new(FillOptions::default().with_workers(4)).unwrap();
//!
//! let mut bytes = vec![0u8; 8 << 20];
//! filler.fill_bytes(&mut bytes, 0xAB);
//! assert!(bytes.iter().all(|&b| b == 0xAB));
//!
//! let mut words = vec![0u64; 1 << 20];
//! filler.fill_words(&mut words, 0xDEAD_BEEF_DEAD_BEEF);
//! assert!(words.iter().all(|&w| w == 0xDEAD_BEEF_DEAD_BEEF));
//! ```
//!
//! The same kernels are exported with C linkage as `parallel_fill_u8` and
//! `parallel_fill_u64` (see [`ffi`]).

#![cfg_attr(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        rustc_channel = "nightly"
    ),
    feature(avx512_target_feature, stdarch_x86_avx512)
)]

pub mod advise;
pub mod error;
pub mod ffi;
pub mod filler;
pub mod partition;
pub mod pool;
pub mod simd;

pub use advise::{advise_huge_pages, AdviceError};
pub use error::{FillError, Result};
pub use filler::{FillOptions, Filler};
pub use partition::{partition, split_partitions, Partition};
pub use simd::traits::SimdFill;
pub use simd::{Backend, Kernels};

/// Regions smaller than this many bytes are filled on the calling thread with
/// a plain `slice::fill`; spawning workers costs more than it saves below it.
pub const FAST_PATH_THRESHOLD: usize = 2 * 1024 * 1024;

/// Distance in bytes ahead of the write cursor at which the vector loop
/// issues its prefetch hint.
pub const PREFETCH_DISTANCE: usize = 256;

/// Vector stores issued per iteration of the main loop.
pub const UNROLL: usize = 4;

/// Fills every byte of `buf` with `value` using `workers` threads.
///
/// Convenience wrapper that borrows a worker pool from the process-wide cache
/// in [`pool`]. Use a [`Filler`] to own a pool or to change the options.
///
/// # Errors
///
/// Returns [`FillError::InvalidWorkerCount`] when `workers` is zero and
/// [`FillError::ThreadPool`] when the pool cannot be started.
pub fn fill_bytes(buf: &mut [u8], value: u8, workers: usize) -> Result<()> {
    Filler::shared(FillOptions::default().with_workers(workers))?.fill_bytes(buf, value);
    Ok(())
}

/// Fills every element of `buf` with `value` using `workers` threads.
///
/// Word counterpart of [`fill_bytes`]; the same errors apply.
pub fn fill_words(buf: &mut [u64], value: u64, workers: usize) -> Result<()> {
    Filler::shared(FillOptions::default().with_workers(workers))?.fill_words(buf, value);
    Ok(())
}
