//! SSE2 fill kernels for 128-bit vector stores.
//!
//! SSE2 is part of the x86_64 baseline, so this backend is the floor for
//! every x86_64 CPU and the fallback for 32-bit x86 CPUs that report it.
//!
//! - **Vector Width**: 128 bits (16 × u8, 2 × u64)
//! - **Alignment**: 16 bytes

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::kernels::{fill_bytes_with, fill_words_with};
use crate::simd::traits::VectorStore;

/// A 128-bit register holding the fill pattern.
#[derive(Copy, Clone, Debug)]
pub struct M128(__m128i);

impl VectorStore for M128 {
    const WIDTH: usize = 16;

    #[inline(always)]
    unsafe fn splat_u8(value: u8) -> Self {
        Self(_mm_set1_epi8(value as i8))
    }

    #[inline(always)]
    unsafe fn splat_u64(value: u64) -> Self {
        Self(_mm_set1_epi64x(value as i64))
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut u8) {
        _mm_store_si128(ptr as *mut __m128i, self.0);
    }

    #[inline(always)]
    unsafe fn prefetch(ptr: *const u8) {
        _mm_prefetch::<_MM_HINT_T0>(ptr as *const i8);
    }
}

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn fill_bytes(chunk: &mut [u8], value: u8) {
    fill_bytes_with::<M128>(chunk, value);
}

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn fill_words(chunk: &mut [u64], value: u64) {
    fill_words_with::<M128>(chunk, value);
}
