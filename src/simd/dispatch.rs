use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{unknown_backend, unsupported_backend, FillError, Result};

/// Kernel that fills a byte region. Unsafe because it may use instructions
/// the CPU lacks; [`Kernels`] only hands out kernels that passed detection.
pub type ByteKernel = unsafe fn(&mut [u8], u8);

/// Kernel that fills a 64-bit word region. See [`ByteKernel`].
pub type WordKernel = unsafe fn(&mut [u64], u64);

static DETECTED: OnceLock<Backend> = OnceLock::new();

/// Instruction set used for the vector bulk of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// `slice::fill`, no explicit vector code.
    Scalar,
    /// 128-bit x86 stores.
    Sse2,
    /// 128-bit AArch64 stores.
    Neon,
    /// 256-bit x86 stores.
    Avx2,
    /// 512-bit x86 stores (nightly builds only).
    Avx512,
}

impl Backend {
    /// All backends, widest first.
    pub const ALL: [Backend; 5] = [
        Backend::Avx512,
        Backend::Avx2,
        Backend::Neon,
        Backend::Sse2,
        Backend::Scalar,
    ];

    /// Returns the widest backend the running CPU supports.
    ///
    /// The CPU is queried on the first call only.
    pub fn detect() -> Backend {
        *DETECTED.get_or_init(|| {
            let backend = Self::ALL
                .into_iter()
                .find(|backend| backend.is_supported())
                .unwrap_or(Backend::Scalar);

            debug!(
                backend = %backend,
                vector_width = backend.vector_width(),
                "fill backend selected"
            );

            backend
        })
    }

    /// Returns `true` when this build contains the backend and the running
    /// CPU can execute it.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse2 => sse2_available(),
            Backend::Avx2 => avx2_available(),
            Backend::Avx512 => avx512_available(),
            Backend::Neon => neon_available(),
        }
    }

    /// Width in bytes of one vector store, which is also the alignment the
    /// bulk loop works at. `Scalar` reports 1.
    pub fn vector_width(self) -> usize {
        match self {
            Backend::Scalar => 1,
            Backend::Sse2 | Backend::Neon => 16,
            Backend::Avx2 => 32,
            Backend::Avx512 => 64,
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse2 => "sse2",
            Backend::Neon => "neon",
            Backend::Avx2 => "avx2",
            Backend::Avx512 => "avx512",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self> {
        Backend::ALL
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown_backend(s))
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn sse2_available() -> bool {
    is_x86_feature_detected!("sse2")
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn avx2_available() -> bool {
    is_x86_feature_detected!("avx2")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn sse2_available() -> bool {
    false
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn avx2_available() -> bool {
    false
}

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    rustc_channel = "nightly"
))]
fn avx512_available() -> bool {
    is_x86_feature_detected!("avx512f")
}

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    rustc_channel = "nightly"
)))]
fn avx512_available() -> bool {
    false
}

#[cfg(target_arch = "aarch64")]
fn neon_available() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(not(target_arch = "aarch64"))]
fn neon_available() -> bool {
    false
}

fn scalar_fill_bytes(chunk: &mut [u8], value: u8) {
    chunk.fill(value);
}

fn scalar_fill_words(chunk: &mut [u64], value: u64) {
    chunk.fill(value);
}

/// Resolved fill kernels for one backend.
///
/// Holding a `Kernels` proves that its backend passed
/// [`Backend::is_supported`], which is what makes the fill methods safe.
#[derive(Clone, Copy)]
pub struct Kernels {
    backend: Backend,
    bytes: ByteKernel,
    words: WordKernel,
}

impl Kernels {
    const SCALAR: Kernels = Kernels {
        backend: Backend::Scalar,
        bytes: scalar_fill_bytes,
        words: scalar_fill_words,
    };

    /// Kernels for the backend picked by [`Backend::detect`].
    pub fn detect() -> Kernels {
        static KERNELS: OnceLock<Kernels> = OnceLock::new();

        *KERNELS.get_or_init(|| Kernels::for_backend(Backend::detect()).unwrap_or(Kernels::SCALAR))
    }

    /// Kernels for a specific backend.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::UnsupportedBackend`] when the backend is not
    /// compiled in or the CPU cannot run it.
    pub fn for_backend(backend: Backend) -> Result<Kernels> {
        if !backend.is_supported() {
            return Err(unsupported_backend(backend));
        }

        let (bytes, words): (ByteKernel, WordKernel) = match backend {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Sse2 => (
                super::sse2::fill_bytes as ByteKernel,
                super::sse2::fill_words as WordKernel,
            ),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2 => (
                super::avx2::fill_bytes as ByteKernel,
                super::avx2::fill_words as WordKernel,
            ),
            #[cfg(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                rustc_channel = "nightly"
            ))]
            Backend::Avx512 => (
                super::avx512::fill_bytes as ByteKernel,
                super::avx512::fill_words as WordKernel,
            ),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => (
                super::neon::fill_bytes as ByteKernel,
                super::neon::fill_words as WordKernel,
            ),
            _ => return Ok(Kernels::SCALAR),
        };

        Ok(Kernels {
            backend,
            bytes,
            words,
        })
    }

    /// The backend these kernels run on.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Fills `chunk` with `value` on the calling thread.
    #[inline]
    pub fn fill_bytes(&self, chunk: &mut [u8], value: u8) {
        // SAFETY: `Kernels` is only built for backends the CPU supports.
        unsafe { (self.bytes)(chunk, value) }
    }

    /// Fills `chunk` with `value` on the calling thread.
    #[inline]
    pub fn fill_words(&self, chunk: &mut [u64], value: u64) {
        // SAFETY: `Kernels` is only built for backends the CPU supports.
        unsafe { (self.words)(chunk, value) }
    }
}

impl fmt::Debug for Kernels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernels")
            .field("backend", &self.backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_always_supported() {
        assert!(Backend::Scalar.is_supported());
        assert_eq!(Kernels::for_backend(Backend::Scalar).unwrap().backend(), Backend::Scalar);
    }

    #[test]
    fn test_detect_picks_widest_supported() {
        let detected = Backend::detect();
        assert!(detected.is_supported());

        for backend in Backend::ALL {
            if backend.vector_width() > detected.vector_width() {
                assert!(!backend.is_supported(), "{backend} is wider than {detected}");
            }
        }
        assert_eq!(Kernels::detect().backend(), detected);
    }

    #[test]
    fn test_unsupported_backend_is_rejected() {
        for backend in Backend::ALL {
            match Kernels::for_backend(backend) {
                Ok(kernels) => assert_eq!(kernels.backend(), backend),
                Err(FillError::UnsupportedBackend { backend: rejected }) => {
                    assert_eq!(rejected, backend);
                    assert!(!backend.is_supported());
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_backend_names_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(backend.name().parse::<Backend>().unwrap(), backend);
        }
        assert_eq!(" AVX2 ".parse::<Backend>().unwrap(), Backend::Avx2);
        assert!(matches!(
            "avx1024".parse::<Backend>(),
            Err(FillError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn test_every_supported_kernel_fills() {
        let mut data = vec![0u8; 4096 + 7];
        let mut words = vec![0u64; 1024 + 3];

        for backend in Backend::ALL.into_iter().filter(|b| b.is_supported()) {
            let kernels = Kernels::for_backend(backend).unwrap();

            kernels.fill_bytes(&mut data[3..], 0x11);
            assert!(data[3..].iter().all(|&b| b == 0x11), "{backend} bytes");
            assert!(data[..3].iter().all(|&b| b == 0), "{backend} wrote before the region");

            kernels.fill_words(&mut words[1..], 0x2222_3333_4444_5555);
            assert!(words[1..].iter().all(|&w| w == 0x2222_3333_4444_5555), "{backend} words");
            assert_eq!(words[0], 0, "{backend} wrote before the region");

            data.fill(0);
            words.fill(0);
        }
    }
}
