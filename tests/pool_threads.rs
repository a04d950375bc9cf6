//! Worker threads stay bounded when C callers vary their thread count.
//!
//! Kept in its own test binary: it counts every thread of the process.

#![cfg(target_os = "linux")]

use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use fastfill::ffi::parallel_fill_u8;
use fastfill::pool::MAX_SHARED_POOLS;

fn live_threads() -> usize {
    fs::read_dir("/proc/self/task").map_or(0, |tasks| tasks.count())
}

#[test]
fn test_varying_thread_counts_do_not_accumulate_threads() {
    const COUNTS: std::ops::RangeInclusive<i32> = 2..=40;

    let before = live_threads();
    let mut buf = vec![0u8; 3 * 1024 * 1024];

    for threads in COUNTS {
        unsafe { parallel_fill_u8(buf.as_mut_ptr(), buf.len(), threads as u8, threads) };
        assert!(buf.iter().all(|&b| b == threads as u8), "threads {threads}");
    }

    // Only the most recently used pools may survive.
    let retained: usize = COUNTS
        .rev()
        .take(MAX_SHARED_POOLS)
        .map(|threads| threads as usize)
        .sum();
    let limit = before + retained;

    // Evicted pools shut their threads down asynchronously.
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut after = live_threads();
    while after > limit && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
        after = live_threads();
    }

    assert!(
        after <= limit,
        "threads before={before} after={after} limit={limit}"
    );
}
