//! Huge-page advisory for fill targets.
//!
//! Before a fill, the region is offered to the kernel for transparent huge
//! pages with `madvise(MADV_HUGEPAGE)`. The hint only affects throughput, so
//! callers log a rejection and carry on.

use thiserror::Error;

/// Why a huge-page hint was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdviceError {
    /// `madvise` returned an error.
    #[error("madvise(MADV_HUGEPAGE) rejected the hint (errno {errno})")]
    Rejected {
        /// OS error code reported by `madvise`.
        errno: i32,
    },

    /// The platform has no transparent huge pages.
    #[error("huge page advice is not supported on this platform")]
    Unsupported,
}

/// Asks the kernel to back `buf` with transparent huge pages.
///
/// Only whole pages inside `buf` are advised: the start is rounded up and the
/// end rounded down to the page size, so memory outside the buffer is never
/// touched. A buffer that spans no whole page is a successful no-op.
///
/// # Errors
///
/// [`AdviceError::Rejected`] when `madvise` fails (for instance when THP is
/// disabled) and [`AdviceError::Unsupported`] on non-Linux targets.
#[cfg(target_os = "linux")]
pub fn advise_huge_pages<T>(buf: &mut [T]) -> Result<(), AdviceError> {
    let page = page_size();
    let start = buf.as_mut_ptr() as *mut u8;
    let len = std::mem::size_of_val(buf);

    let lead = crate::simd::utils::align_offset_bytes(start, page);
    if lead >= len {
        return Ok(());
    }

    let advised = (len - lead) & !(page - 1);
    if advised == 0 {
        return Ok(());
    }

    // SAFETY: the advised range lies inside `buf`, which we borrow mutably.
    // MADV_HUGEPAGE changes no contents, only how the pages are backed.
    let rc = unsafe {
        libc::madvise(
            start.add(lead) as *mut libc::c_void,
            advised,
            libc::MADV_HUGEPAGE,
        )
    };

    if rc != 0 {
        let errno = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or_default();
        return Err(AdviceError::Rejected { errno });
    }

    Ok(())
}

/// Asks the kernel to back `buf` with transparent huge pages.
///
/// # Errors
///
/// Always [`AdviceError::Unsupported`] on this platform.
#[cfg(not(target_os = "linux"))]
pub fn advise_huge_pages<T>(buf: &mut [T]) -> Result<(), AdviceError> {
    let _ = buf;
    Err(AdviceError::Unsupported)
}

/// System page size in bytes, queried once.
#[cfg(target_os = "linux")]
pub fn page_size() -> usize {
    use std::sync::OnceLock;

    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

    *PAGE_SIZE.get_or_init(|| {
        // SAFETY: sysconf has no memory-safety preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

        match usize::try_from(size) {
            Ok(size) if size.is_power_of_two() => size,
            _ => 4096,
        }
    })
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(page_size().is_power_of_two());
        assert!(page_size() >= 4096);
    }

    #[test]
    fn test_region_without_whole_page_is_noop() {
        let mut small = vec![0u8; 100];
        assert_eq!(advise_huge_pages(&mut small), Ok(()));

        let mut empty: Vec<u64> = Vec::new();
        assert_eq!(advise_huge_pages(&mut empty), Ok(()));
    }

    #[test]
    fn test_advice_never_changes_contents() {
        let mut data = vec![0x5Au8; 4 << 20];

        // THP may be disabled on the test host; only the error kind matters.
        match advise_huge_pages(&mut data[1..]) {
            Ok(()) | Err(AdviceError::Rejected { .. }) => {}
            Err(AdviceError::Unsupported) => panic!("linux must support the hint"),
        }

        assert!(data.iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn test_rejection_display() {
        let error = AdviceError::Rejected { errno: 22 };
        assert!(error.to_string().contains("errno 22"));
    }
}
