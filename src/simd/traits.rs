use crate::error::Result;

/// One vector register's worth of a repeated fill pattern.
///
/// Implemented by each backend for its native register type. All methods
/// are `#[inline(always)]` in the implementations so that they fold into the
/// `#[target_feature]` entry point of the backend that drives them.
pub trait VectorStore: Copy {
    /// Register width in bytes. Also the alignment the aligned store needs.
    const WIDTH: usize;

    /// Broadcasts `value` to every byte of the register.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn splat_u8(value: u8) -> Self {
        Self::splat_u64(u64::from_ne_bytes([value; 8]))
    }

    /// Broadcasts `value` to every 64-bit lane of the register.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn splat_u64(value: u64) -> Self;

    /// Writes the register to `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `WIDTH` bytes of writes and aligned to `WIDTH`.
    unsafe fn store_aligned(self, ptr: *mut u8);

    /// Hints that the cache line holding `ptr` is about to be written.
    ///
    /// Never faults, whatever `ptr` points at. The default does nothing.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    #[inline(always)]
    unsafe fn prefetch(ptr: *const u8) {
        let _ = ptr;
    }
}

/// Fill operations on slices, in scalar, single-threaded SIMD and parallel
/// SIMD flavours.
pub trait SimdFill<T> {
    /// Plain `slice::fill` on the calling thread.
    fn scalar_fill(&mut self, value: T);

    /// Vector fill on the calling thread with the detected backend.
    fn simd_fill(&mut self, value: T);

    /// Partitioned vector fill over `workers` threads.
    ///
    /// # Errors
    ///
    /// Fails when `workers` is zero or the worker pool cannot be started.
    fn par_simd_fill(&mut self, value: T, workers: usize) -> Result<()>;
}
