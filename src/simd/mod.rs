//! Vector fill kernels and the runtime dispatch that picks one.
//!
//! Every backend implements [`traits::VectorStore`] for its register type and
//! feeds it through the shared driver in [`kernels`]. [`Backend::detect`]
//! queries the CPU once; [`Kernels`] holds the resolved function pointers.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse2;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    rustc_channel = "nightly"
))]
pub mod avx512;

#[cfg(target_arch = "aarch64")]
pub mod neon;

mod dispatch;
pub mod kernels;
pub mod slice;
pub mod traits;
pub mod utils;

pub use dispatch::{Backend, ByteKernel, Kernels, WordKernel};
