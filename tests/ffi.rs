//! The C entry points, driven the way a foreign caller would.

use std::ffi::c_int;

use fastfill::ffi::{parallel_fill_u64, parallel_fill_u8};

#[test]
fn test_u8_entry_point() {
    let mut buf = vec![0u8; 16 * 1024 * 1024 + 3];
    unsafe { parallel_fill_u8(buf.as_mut_ptr(), buf.len(), 205, 8) };

    assert!(buf.iter().all(|&b| b == 205));
}

#[test]
fn test_u64_entry_point() {
    let value = 1_234_567_890_123_456_789u64;
    let mut buf = vec![0u64; 2 * 1024 * 1024 + 1];
    unsafe { parallel_fill_u64(buf.as_mut_ptr(), buf.len(), value, 8) };

    assert!(buf.iter().all(|&w| w == value));
}

#[test]
fn test_u64_view_of_byte_buffer() {
    // The same memory filled as bytes, then re-viewed and filled as words.
    let mut words = vec![0u64; 1 << 20];
    let bytes = words.len() * 8;

    unsafe { parallel_fill_u8(words.as_mut_ptr() as *mut u8, bytes, 0xCD, 4) };
    assert!(words.iter().all(|&w| w == 0xCDCD_CDCD_CDCD_CDCD));

    unsafe { parallel_fill_u64(words.as_mut_ptr(), words.len(), 42, 4) };
    assert!(words.iter().all(|&w| w == 42));
}

#[test]
fn test_partial_region_leaves_neighbours_alone() {
    let mut buf = vec![0x11u8; 4 * 1024 * 1024];
    let (start, len) = (13, 3 * 1024 * 1024 + 1);

    unsafe { parallel_fill_u8(buf.as_mut_ptr().add(start), len, 0x22, 3) };

    assert!(buf[..start].iter().all(|&b| b == 0x11));
    assert!(buf[start..start + len].iter().all(|&b| b == 0x22));
    assert!(buf[start + len..].iter().all(|&b| b == 0x11));
}

#[test]
fn test_concurrent_callers_with_different_thread_counts() {
    std::thread::scope(|scope| {
        for threads in [1 as c_int, 2, 3, 4, 8] {
            scope.spawn(move || {
                let mut buf = vec![0u64; 600_000];
                let value = threads as u64 * 0x0101_0101;
                unsafe { parallel_fill_u64(buf.as_mut_ptr(), buf.len(), value, threads) };
                assert!(buf.iter().all(|&w| w == value), "threads {threads}");
            });
        }
    });
}
