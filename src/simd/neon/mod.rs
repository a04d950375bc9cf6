//! ARM NEON fill kernels for 128-bit vector stores.
//!
//! NEON is mandatory on AArch64, so this backend is always available there.
//! Stable Rust exposes no prefetch intrinsic for AArch64; the store loop
//! relies on the hardware prefetcher instead.
//!
//! - **Vector Width**: 128 bits (16 × u8, 2 × u64)
//! - **Alignment**: 16 bytes

use std::arch::aarch64::*;

use crate::simd::kernels::{fill_bytes_with, fill_words_with};
use crate::simd::traits::VectorStore;

/// A 128-bit NEON register holding the fill pattern.
#[derive(Copy, Clone, Debug)]
pub struct Q128(uint8x16_t);

impl VectorStore for Q128 {
    const WIDTH: usize = 16;

    #[inline(always)]
    unsafe fn splat_u8(value: u8) -> Self {
        Self(vdupq_n_u8(value))
    }

    #[inline(always)]
    unsafe fn splat_u64(value: u64) -> Self {
        Self(vreinterpretq_u8_u64(vdupq_n_u64(value)))
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut u8) {
        vst1q_u8(ptr, self.0);
    }
}

/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn fill_bytes(chunk: &mut [u8], value: u8) {
    fill_bytes_with::<Q128>(chunk, value);
}

/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn fill_words(chunk: &mut [u64], value: u64) {
    fill_words_with::<Q128>(chunk, value);
}
