use std::ops::Range;

/// Information about a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInfo {
    pub range: Range<usize>,
}

/// An iterator that splits the chains to compute into contiguous batches.
/// Every chain index belongs to exactly one batch, so workers never share a slot.
#[derive(Clone)]
pub struct BatchIterator {
    range_start: usize,
    batch_size: usize,
    chains_remainder: usize,
    batch_number: usize,
    batches: usize,
}

impl BatchIterator {
    /// Number of batches given to each thread.
    /// More than one lets fast threads steal work from slow ones, and gives finer progress.
    const BATCHES_PER_THREAD: usize = 4;

    /// Creates a new batch iterator where `chains_len` is the total number of chains to generate.
    pub fn new(chains_len: usize, threads: usize) -> BatchIterator {
        let batches = (threads * Self::BATCHES_PER_THREAD).clamp(1, chains_len.max(1));

        BatchIterator {
            range_start: 0,
            batch_size: chains_len / batches,
            chains_remainder: chains_len % batches,
            batches,
            batch_number: 0,
        }
    }
}

impl Iterator for BatchIterator {
    type Item = BatchInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.batch_number == self.batches {
            return None;
        }

        // spread the remainder over the first batches
        let batch_size = if self.batch_number < self.chains_remainder {
            self.batch_size + 1
        } else {
            self.batch_size
        };

        let range_end = self.range_start + batch_size;
        let range = self.range_start..range_end;
        self.range_start = range_end;

        self.batch_number += 1;
        Some(BatchInfo { range })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.batches - self.batch_number,
            Some(self.batches - self.batch_number),
        )
    }
}

impl ExactSizeIterator for BatchIterator {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::scheduling::BatchIterator;

    #[test]
    fn test_batch_iterator_small_batch() {
        // fewer chains than wanted batches, one chain per batch
        let batches = BatchIterator::new(3, 8).collect_vec();

        assert_eq!(3, batches.len());
        assert!(batches.iter().all(|batch| batch.range.len() == 1));
    }

    #[test]
    fn test_batch_iterator_perfect_batch_size() {
        let threads = 2;
        let chains_len = BatchIterator::BATCHES_PER_THREAD * threads * 100;
        let batch_iterator = BatchIterator::new(chains_len, threads);

        assert_eq!(BatchIterator::BATCHES_PER_THREAD * threads, batch_iterator.len());

        for batch_info in batch_iterator {
            assert_eq!(100, batch_info.range.len());
        }
    }

    #[test]
    fn test_batch_iterator_remainder() {
        let chains_len = 1_003;
        let batches = BatchIterator::new(chains_len, 3).collect_vec();

        assert_eq!(12, batches.len());

        // the ranges are contiguous and cover every chain exactly once
        assert_eq!(0, batches.first().unwrap().range.start);
        assert_eq!(chains_len, batches.last().unwrap().range.end);
        for (a, b) in batches.iter().tuple_windows() {
            assert_eq!(a.range.end, b.range.start);
        }

        // 1003 = 12 * 83 + 7, the first 7 batches get one more chain
        assert!(batches[..7].iter().all(|batch| batch.range.len() == 84));
        assert!(batches[7..].iter().all(|batch| batch.range.len() == 83));
    }
}
