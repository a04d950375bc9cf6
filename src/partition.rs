//! Splitting a buffer into one contiguous range per worker.
//!
//! Each of the first `workers - 1` partitions gets `len / workers` elements;
//! the last one runs to the end of the buffer and absorbs the remainder.
//! When `len < workers` the leading partitions are empty and the last one
//! holds everything.

use std::ops::Range;

/// A contiguous range of a buffer assigned to one worker for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Index of the worker that fills this range.
    pub worker: usize,
    /// Offset of the first element.
    pub start: usize,
    /// Number of elements.
    pub len: usize,
}

impl Partition {
    /// Offset one past the last element.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The partition as an index range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Splits `len` elements into `workers` partitions.
///
/// A `workers` of zero is treated as one.
pub fn partition(len: usize, workers: usize) -> Vec<Partition> {
    let workers = workers.max(1);
    let chunk = len / workers;

    (0..workers)
        .map(|worker| {
            let start = worker * chunk;
            let end = if worker == workers - 1 { len } else { start + chunk };

            Partition {
                worker,
                start,
                len: end - start,
            }
        })
        .collect()
}

/// Splits `buf` into the disjoint sub-slices described by
/// [`partition`]`(buf.len(), workers)`, in worker order.
pub fn split_partitions<T>(buf: &mut [T], workers: usize) -> Vec<&mut [T]> {
    let partitions = partition(buf.len(), workers);
    let mut chunks = Vec::with_capacity(partitions.len());
    let mut rest = buf;

    for part in &partitions {
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(part.len);
        chunks.push(chunk);
        rest = tail;
    }

    debug_assert!(rest.is_empty(), "partitions must cover the whole buffer");

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(len: usize, workers: usize) {
        let parts = partition(len, workers);

        assert_eq!(parts.len(), workers.max(1));
        assert_eq!(parts[0].start, 0);
        assert_eq!(parts.last().unwrap().end(), len);

        for pair in parts.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start, "gap or overlap in {len}/{workers}");
        }

        let chunk = len / workers.max(1);
        for part in &parts[..parts.len() - 1] {
            assert_eq!(part.len, chunk);
        }
    }

    #[test]
    fn test_partition_covers_buffer_exactly() {
        for len in [0, 1, 7, 8, 9, 31, 32, 33, 1000, 1_048_576 + 3] {
            for workers in 1..=17 {
                assert_exact_cover(len, workers);
            }
        }
    }

    #[test]
    fn test_last_partition_absorbs_remainder() {
        let parts = partition(10, 4);

        assert_eq!(
            parts.iter().map(|p| p.len).collect::<Vec<_>>(),
            vec![2, 2, 2, 4]
        );
        assert_eq!(parts[3].range(), 6..10);
    }

    #[test]
    fn test_fewer_elements_than_workers() {
        let parts = partition(3, 8);

        assert!(parts[..7].iter().all(|p| p.len == 0));
        assert_eq!(parts[7].range(), 0..3);
    }

    #[test]
    fn test_zero_workers_is_one_partition() {
        assert_eq!(
            partition(5, 0),
            vec![Partition {
                worker: 0,
                start: 0,
                len: 5
            }]
        );
    }

    #[test]
    fn test_split_partitions_matches_descriptors() {
        let mut data: Vec<u32> = (0..103).collect();
        let parts = partition(data.len(), 6);
        let chunks = split_partitions(&mut data, 6);

        assert_eq!(chunks.len(), parts.len());
        for (chunk, part) in chunks.iter().zip(&parts) {
            assert_eq!(chunk.len(), part.len);
            if let Some(first) = chunk.first() {
                assert_eq!(*first as usize, part.start);
            }
        }
    }
}
