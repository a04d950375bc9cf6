//! AVX-512 fill kernels for 512-bit vector stores.
//!
//! Only compiled on nightly toolchains (see `build.rs`), where the
//! `avx512_target_feature` gate is available. Byte patterns are broadcast
//! as a 64-bit word so only AVX-512F is required, not AVX-512BW.
//!
//! - **Vector Width**: 512 bits (64 × u8, 8 × u64)
//! - **Alignment**: 64 bytes, one cache line per store

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::kernels::{fill_bytes_with, fill_words_with};
use crate::simd::traits::VectorStore;

/// A 512-bit register holding the fill pattern.
#[derive(Copy, Clone, Debug)]
pub struct M512(__m512i);

impl VectorStore for M512 {
    const WIDTH: usize = 64;

    #[inline(always)]
    unsafe fn splat_u64(value: u64) -> Self {
        Self(_mm512_set1_epi64(value as i64))
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut u8) {
        _mm512_store_epi64(ptr as *mut i64, self.0);
    }

    #[inline(always)]
    unsafe fn prefetch(ptr: *const u8) {
        _mm_prefetch::<_MM_HINT_T0>(ptr as *const i8);
    }
}

/// # Safety
///
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
pub unsafe fn fill_bytes(chunk: &mut [u8], value: u8) {
    fill_bytes_with::<M512>(chunk, value);
}

/// # Safety
///
/// The CPU must support AVX-512F.
#[target_feature(enable = "avx512f")]
pub unsafe fn fill_words(chunk: &mut [u64], value: u64) {
    fill_words_with::<M512>(chunk, value);
}
