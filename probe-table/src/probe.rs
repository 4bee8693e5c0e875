//! Linear probe sequence

use core::iter::FusedIterator;

/// Candidate slot indices for one key: `start, start + 1, ...` modulo the
/// capacity, visiting every slot exactly once.
///
/// The sequence is finite and restartable by cloning.
///
/// ```
/// use probe_table::probe::ProbeSequence;
///
/// let order: Vec<usize> = ProbeSequence::new(3, 5).collect();
/// assert_eq!(order, vec![3, 4, 0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    start: usize,
    capacity: usize,
    step: usize,
}

impl ProbeSequence {
    /// Creates a sequence starting at `start`.
    ///
    /// `start` is reduced modulo `capacity`; a capacity of zero yields an
    /// empty sequence.
    pub fn new(start: usize, capacity: usize) -> Self {
        let start = if capacity == 0 { 0 } else { start % capacity };
        Self {
            start,
            capacity,
            step: 0,
        }
    }

    /// Index the sequence started from
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of indices yielded so far
    pub fn steps(&self) -> usize {
        self.step
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        // start < capacity and step < capacity, so only one wrap is possible.
        let idx = self.start + self.step;
        self.step += 1;
        Some(if idx >= self.capacity {
            idx - self.capacity
        } else {
            idx
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_wraps_once() {
        let seq: Vec<_> = ProbeSequence::new(3, 5).collect();
        assert_eq!(seq, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_starts_at_zero() {
        let seq: Vec<_> = ProbeSequence::new(0, 4).collect();
        assert_eq!(seq, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_start_is_reduced() {
        let seq = ProbeSequence::new(12, 5);
        assert_eq!(seq.start(), 2);
        assert_eq!(seq.collect::<Vec<_>>(), vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_zero_capacity_is_empty() {
        assert_eq!(ProbeSequence::new(7, 0).next(), None);
    }

    #[test]
    fn test_exact_size_and_restart() {
        let mut seq = ProbeSequence::new(1, 3);
        assert_eq!(seq.len(), 3);
        seq.next();
        let restart = seq.clone();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.steps(), 1);
        assert_eq!(restart.collect::<Vec<_>>(), vec![2, 0]);
        assert_eq!(seq.by_ref().count(), 2);
        assert_eq!(seq.next(), None);
    }
}
