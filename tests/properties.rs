//! Property tests: any size, offset, worker count and value fills exactly
//! the requested region.

use fastfill::{FillOptions, Filler};
use proptest::prelude::*;

fn filler(workers: usize) -> Filler {
    Filler::shared(
        FillOptions::default()
            .with_workers(workers)
            .with_fast_path_threshold(0)
            .with_huge_page_advice(false),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_byte_fill_covers_region_exactly(
        size in 0..20_000usize,
        offset in 0..64usize,
        workers in 1..=9usize,
        value in any::<u8>(),
    ) {
        let sentinel = !value;
        let mut backing = vec![sentinel; offset + size + 64];

        filler(workers).fill_bytes(&mut backing[offset..offset + size], value);

        prop_assert!(backing[..offset].iter().all(|&b| b == sentinel));
        prop_assert!(backing[offset..offset + size].iter().all(|&b| b == value));
        prop_assert!(backing[offset + size..].iter().all(|&b| b == sentinel));
    }

    #[test]
    fn prop_word_fill_covers_region_exactly(
        count in 0..5_000usize,
        offset in 0..8usize,
        workers in 1..=9usize,
        value in any::<u64>(),
    ) {
        let sentinel = !value;
        let mut backing = vec![sentinel; offset + count + 8];

        filler(workers).fill_words(&mut backing[offset..offset + count], value);

        prop_assert!(backing[..offset].iter().all(|&w| w == sentinel));
        prop_assert!(backing[offset..offset + count].iter().all(|&w| w == value));
        prop_assert!(backing[offset + count..].iter().all(|&w| w == sentinel));
    }

    #[test]
    fn prop_worker_count_does_not_change_result(
        size in 0..50_000usize,
        workers in 2..=16usize,
        value in any::<u8>(),
    ) {
        let mut single = vec![0u8; size];
        let mut many = vec![0u8; size];

        filler(1).fill_bytes(&mut single, value);
        filler(workers).fill_bytes(&mut many, value);

        prop_assert_eq!(single, many);
    }
}
