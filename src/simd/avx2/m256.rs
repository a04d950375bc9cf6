//! 256-bit AVX2 register wrapper for fill patterns.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::traits::VectorStore;

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// A 256-bit register holding the fill pattern.
///
/// Built with `_mm256_set1_epi8` for byte patterns and `_mm256_set1_epi64x`
/// for word patterns, so the same store loop serves both.
#[derive(Copy, Clone, Debug)]
pub struct M256(__m256i);

impl VectorStore for M256 {
    const WIDTH: usize = AVX_ALIGNMENT;

    #[inline(always)]
    unsafe fn splat_u8(value: u8) -> Self {
        Self(_mm256_set1_epi8(value as i8))
    }

    #[inline(always)]
    unsafe fn splat_u64(value: u64) -> Self {
        Self(_mm256_set1_epi64x(value as i64))
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut u8) {
        _mm256_store_si256(ptr as *mut __m256i, self.0);
    }

    #[inline(always)]
    unsafe fn prefetch(ptr: *const u8) {
        _mm_prefetch::<_MM_HINT_T0>(ptr as *const i8);
    }
}
