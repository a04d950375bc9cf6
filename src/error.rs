//! Error types for fastfill operations.
//!
//! The fill kernels themselves cannot fail: a call either runs to completion
//! or violates its safety contract. Errors only come from setting a fill up,
//! i.e. validating options, starting worker pools and selecting a backend.

use thiserror::Error;

use crate::simd::Backend;

/// Errors that can occur while configuring a fill.
#[derive(Debug, Error)]
pub enum FillError {
    /// A fill needs at least one worker.
    #[error("invalid worker count: {workers} (at least one worker is required)")]
    InvalidWorkerCount {
        /// The rejected worker count.
        workers: usize,
    },

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The requested backend is not available on this CPU or target.
    #[error("backend {backend} is not supported on this CPU")]
    UnsupportedBackend {
        /// The backend that was requested.
        backend: Backend,
    },

    /// A backend name did not match any known backend.
    #[error("unknown backend: {name:?}")]
    UnknownBackend {
        /// The name that failed to parse.
        name: String,
    },
}

/// Result type alias for fastfill operations.
pub type Result<T> = std::result::Result<T, FillError>;

/// Creates an invalid worker count error.
pub fn invalid_worker_count(workers: usize) -> FillError {
    FillError::InvalidWorkerCount { workers }
}

/// Creates an unsupported backend error.
pub fn unsupported_backend(backend: Backend) -> FillError {
    FillError::UnsupportedBackend { backend }
}

/// Creates an unknown backend error.
pub fn unknown_backend(name: impl Into<String>) -> FillError {
    FillError::UnknownBackend { name: name.into() }
}
