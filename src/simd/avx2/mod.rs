//! AVX2 fill kernels for 256-bit vector stores.
//!
//! This is the reference width of the crate: 32-byte aligned stores, four per
//! loop iteration (128 bytes), with a prefetch 256 bytes ahead.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: selected by [`Backend::detect`](crate::Backend::detect)
//!   when `is_x86_feature_detected!("avx2")` holds
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (32 × u8, 4 × u64)
//! - **Memory Alignment**: 32 bytes; the driver fills up to the first aligned
//!   address with scalar stores and never issues a misaligned vector store

pub mod m256;

use crate::simd::kernels::{fill_bytes_with, fill_words_with};

use self::m256::M256;

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn fill_bytes(chunk: &mut [u8], value: u8) {
    fill_bytes_with::<M256>(chunk, value);
}

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn fill_words(chunk: &mut [u64], value: u64) {
    fill_words_with::<M256>(chunk, value);
}
