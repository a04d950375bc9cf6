//! Backend-independent fill driver.
//!
//! A region is filled in three steps:
//!
//! - a scalar prefix up to the first `V::WIDTH`-aligned address,
//! - the aligned bulk, [`UNROLL`] vector stores per iteration with a prefetch
//!   [`PREFETCH_DISTANCE`] bytes ahead of the cursor, then single stores for
//!   the blocks that do not fill a whole iteration,
//! - a scalar tail shorter than one vector.
//!
//! Backends call these from their `#[target_feature]` entry points; everything
//! here is `#[inline(always)]` so the intrinsics end up compiled with the
//! backend's features enabled.

use crate::simd::traits::VectorStore;
use crate::simd::utils::{is_aligned, prefix_len};
use crate::{PREFETCH_DISTANCE, UNROLL};

/// Fills `chunk` with `value` using vector type `V` for the aligned bulk.
///
/// # Safety
///
/// The CPU must support `V`'s instruction set.
#[inline(always)]
pub unsafe fn fill_bytes_with<V: VectorStore>(chunk: &mut [u8], value: u8) {
    let prefix = prefix_len(chunk.as_ptr(), chunk.len(), V::WIDTH);
    let (head, body) = chunk.split_at_mut(prefix);
    head.fill(value);

    let blocks = body.len() / V::WIDTH;
    let (bulk, tail) = body.split_at_mut(blocks * V::WIDTH);

    if blocks > 0 {
        store_blocks(bulk.as_mut_ptr(), blocks, V::splat_u8(value));
    }

    tail.fill(value);
}

/// Fills `chunk` with `value` using vector type `V` for the aligned bulk.
///
/// Each register holds `V::WIDTH / 8` elements, so one unrolled iteration
/// covers `UNROLL * V::WIDTH / 8` elements (16 for 256-bit registers).
///
/// # Safety
///
/// The CPU must support `V`'s instruction set.
#[inline(always)]
pub unsafe fn fill_words_with<V: VectorStore>(chunk: &mut [u64], value: u64) {
    let lanes = V::WIDTH / core::mem::size_of::<u64>();

    let prefix = prefix_len(chunk.as_ptr(), chunk.len(), V::WIDTH);
    let (head, body) = chunk.split_at_mut(prefix);
    head.fill(value);

    let blocks = body.len() / lanes;
    let (bulk, tail) = body.split_at_mut(blocks * lanes);

    if blocks > 0 {
        store_blocks(bulk.as_mut_ptr() as *mut u8, blocks, V::splat_u64(value));
    }

    tail.fill(value);
}

/// Writes `blocks` consecutive copies of `v` starting at `dst`.
///
/// # Safety
///
/// `dst` must be aligned to `V::WIDTH` and valid for `blocks * V::WIDTH`
/// bytes of writes.
#[inline(always)]
unsafe fn store_blocks<V: VectorStore>(dst: *mut u8, blocks: usize, v: V) {
    debug_assert!(is_aligned(dst, V::WIDTH), "bulk must start on a vector boundary");

    let mut i = 0;

    while i + UNROLL <= blocks {
        let ptr = dst.add(i * V::WIDTH);

        // The hint may point past the region; prefetches never fault.
        V::prefetch(ptr.wrapping_add(PREFETCH_DISTANCE));

        v.store_aligned(ptr);
        v.store_aligned(ptr.add(V::WIDTH));
        v.store_aligned(ptr.add(2 * V::WIDTH));
        v.store_aligned(ptr.add(3 * V::WIDTH));

        i += UNROLL;
    }

    while i < blocks {
        v.store_aligned(dst.add(i * V::WIDTH));
        i += 1;
    }
}
