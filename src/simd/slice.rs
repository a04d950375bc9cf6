//! [`SimdFill`] for byte and word slices.
//!
//! ```rust
//! use fastfill::SimdFill;
//!
//! let mut buf = vec![0u8; 100_000];
//!
//! buf.scalar_fill(1);
//! buf.simd_fill(2);
//! buf.par_simd_fill(3, 4).unwrap();
//! assert!(buf.iter().all(|&b| b == 3));
//! ```

use crate::error::Result;
use crate::filler::{FillOptions, Filler};
use crate::simd::traits::SimdFill;
use crate::simd::Kernels;

#[inline(always)]
pub fn scalar_fill<T: Copy>(buf: &mut [T], value: T) {
    buf.fill(value);
}

impl SimdFill<u8> for [u8] {
    #[inline(always)]
    fn scalar_fill(&mut self, value: u8) {
        scalar_fill(self, value);
    }

    #[inline(always)]
    fn simd_fill(&mut self, value: u8) {
        Kernels::detect().fill_bytes(self, value);
    }

    fn par_simd_fill(&mut self, value: u8, workers: usize) -> Result<()> {
        Filler::shared(FillOptions::default().with_workers(workers))?.fill_bytes(self, value);
        Ok(())
    }
}

impl SimdFill<u64> for [u64] {
    #[inline(always)]
    fn scalar_fill(&mut self, value: u64) {
        scalar_fill(self, value);
    }

    #[inline(always)]
    fn simd_fill(&mut self, value: u64) {
        Kernels::detect().fill_words(self, value);
    }

    fn par_simd_fill(&mut self, value: u64, workers: usize) -> Result<()> {
        Filler::shared(FillOptions::default().with_workers(workers))?.fill_words(self, value);
        Ok(())
    }
}
