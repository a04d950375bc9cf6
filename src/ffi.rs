//! C-linkage entry points, declared in `include/fastfill.h`.
//!
//! Both functions are synchronous and return only after the whole region is
//! written. Worker pools come from [`pool::shared`](crate::pool::shared), one
//! per thread count for the few most recently used counts, so callers on
//! different threads asking for different counts do not interfere. Nothing is reported back to the
//! caller: a pool that cannot be started degrades to a single-threaded
//! fill on the calling thread.

use std::ffi::c_int;
use std::slice;

use tracing::warn;

use crate::error::Result;
use crate::filler::{FillOptions, Filler};
use crate::simd::Kernels;

/// Fills `size_bytes` bytes at `data` with `value` using `num_threads`
/// workers.
///
/// A null `data` or zero `size_bytes` is a no-op. `num_threads <= 0` is
/// treated as 1.
///
/// # Safety
///
/// `data` must be valid for writes of `size_bytes` bytes for the duration of
/// the call, and nothing else may access that memory meanwhile.
#[no_mangle]
pub unsafe extern "C" fn parallel_fill_u8(
    data: *mut u8,
    size_bytes: usize,
    value: u8,
    num_threads: c_int,
) {
    if data.is_null() || size_bytes == 0 {
        return;
    }

    // SAFETY: the caller guarantees `data` is valid for `size_bytes` writes.
    let buf = unsafe { slice::from_raw_parts_mut(data, size_bytes) };

    fill_bytes_or_inline(filler(num_threads), buf, value);
}

/// Fills `num_elements` 64-bit words at `data` with `value` using
/// `num_threads` workers.
///
/// A null `data` or zero `num_elements` is a no-op. `num_threads <= 0` is
/// treated as 1.
///
/// # Safety
///
/// `data` must be aligned to 8 bytes and valid for writes of `num_elements`
/// words for the duration of the call, and nothing else may access that
/// memory meanwhile.
#[no_mangle]
pub unsafe extern "C" fn parallel_fill_u64(
    data: *mut u64,
    num_elements: usize,
    value: u64,
    num_threads: c_int,
) {
    if data.is_null() || num_elements == 0 {
        return;
    }

    // SAFETY: the caller guarantees `data` is aligned and valid for
    // `num_elements` writes.
    let buf = unsafe { slice::from_raw_parts_mut(data, num_elements) };

    fill_words_or_inline(filler(num_threads), buf, value);
}

fn filler(num_threads: c_int) -> Result<Filler> {
    let workers = usize::try_from(num_threads).unwrap_or(0).max(1);
    Filler::shared(FillOptions::default().with_workers(workers))
}

/// Fills with `filler`, or on the calling thread when it could not be built.
fn fill_bytes_or_inline(filler: Result<Filler>, buf: &mut [u8], value: u8) {
    match filler {
        Ok(filler) => filler.fill_bytes(buf, value),
        Err(err) => {
            warn!(error = %err, "falling back to a single-threaded fill");
            Kernels::detect().fill_bytes(buf, value);
        }
    }
}

fn fill_words_or_inline(filler: Result<Filler>, buf: &mut [u64], value: u64) {
    match filler {
        Ok(filler) => filler.fill_words(buf, value),
        Err(err) => {
            warn!(error = %err, "falling back to a single-threaded fill");
            Kernels::detect().fill_words(buf, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::invalid_worker_count;

    #[test]
    fn test_null_and_empty_are_noops() {
        unsafe {
            parallel_fill_u8(std::ptr::null_mut(), 1024, 1, 4);
            parallel_fill_u64(std::ptr::null_mut(), 1024, 1, 4);
        }

        let mut buf = vec![7u8; 8];
        unsafe { parallel_fill_u8(buf.as_mut_ptr(), 0, 1, 4) };
        assert!(buf.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_non_positive_thread_counts_fill_single_threaded() {
        for threads in [0, -1, c_int::MIN] {
            let mut buf = vec![0u64; 300_000];
            unsafe { parallel_fill_u64(buf.as_mut_ptr(), buf.len(), 9, threads) };
            assert!(buf.iter().all(|&w| w == 9), "threads {threads}");
        }
    }

    #[test]
    fn test_failed_filler_falls_back_to_inline_fill() {
        let mut bytes = vec![0u8; 3 * 1024 * 1024 + 5];
        fill_bytes_or_inline(Err(invalid_worker_count(0)), &mut bytes[1..], 0xE1);
        assert_eq!(bytes[0], 0);
        assert!(bytes[1..].iter().all(|&b| b == 0xE1));

        let mut words = vec![0u64; 300_001];
        fill_words_or_inline(Err(invalid_worker_count(0)), &mut words, u64::MAX);
        assert!(words.iter().all(|&w| w == u64::MAX));
    }

    #[test]
    fn test_filler_worker_count() {
        assert_eq!(filler(8).unwrap().options().workers, 8);
        assert_eq!(filler(0).unwrap().options().workers, 1);
        assert_eq!(filler(-3).unwrap().options().workers, 1);
    }
}
