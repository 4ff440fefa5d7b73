//! Ordering of results that arrive from parallel workers
//!
//! Results are held in a min-heap until every result before them in
//! (year, day, part) order has been emitted. A second min-heap tracks the
//! keys still expected.

use crate::executor::SolverResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Output position of a result, ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Min-heap entry; the heap's maximum is the smallest key
struct Pending(SolverResult);

impl Pending {
    fn key(&self) -> ResultKey {
        ResultKey::from(&self.0)
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// Buffers results and releases them in key order
pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return every result that is now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Pending(result));

        let mut ready = Vec::new();
        while let Some(&Reverse(next)) = self.expected.peek() {
            if self.pending.peek().map(Pending::key) != Some(next) {
                break;
            }
            self.expected.pop();
            if let Some(Pending(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Remove whatever is still buffered, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|p| p.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Whether every expected result has been released
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(vec![key(2025, 3, 1), key(2025, 3, 2)]);

        let ready = agg.add(make_result(key(2025, 3, 1)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(key(2025, 3, 2)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new(vec![key(2025, 11, 1), key(2025, 11, 2), key(2025, 12, 1)]);

        assert!(agg.add(make_result(key(2025, 11, 2))).is_empty());
        assert!(agg.add(make_result(key(2025, 12, 1))).is_empty());

        let ready: Vec<_> = agg
            .add(make_result(key(2025, 11, 1)))
            .iter()
            .map(ResultKey::from)
            .collect();
        assert_eq!(ready, vec![key(2025, 11, 1), key(2025, 11, 2), key(2025, 12, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(vec![key(2025, 12, 1), key(2025, 12, 2)]);

        agg.add(make_result(key(2025, 12, 2)));
        assert!(!agg.is_complete());

        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_released_sorted(
            keys in prop::collection::btree_set((2015u16..2035, 1u8..=25, 1u8..=2), 1..20)
                .prop_map(|set| set.into_iter().map(|(y, d, p)| key(y, d, p)).collect::<Vec<_>>())
                .prop_shuffle(),
        ) {
            let mut expected = keys.clone();
            expected.sort();

            let mut agg = ResultAggregator::new(keys.clone());
            let mut released = Vec::new();
            for k in keys {
                released.extend(agg.add(make_result(k)).iter().map(ResultKey::from));
            }

            prop_assert!(agg.is_complete());
            prop_assert_eq!(released, expected);
        }
    }
}
