//! Reference fuzzy matcher by full scan.

use std::collections::BinaryHeap;

use crate::distance::Metric;
use crate::error::{Error, Result};
use crate::matcher::Match;
use crate::vptree::HeapMatch;

/// A fuzzy matcher that compares the query to every stored element.
///
/// `O(n)` metric evaluations per query, no construction cost beyond the
/// target copy. This is the reference implementation the accelerated
/// matcher is checked against, and the better choice for small target
/// sets where index construction does not pay off.
pub struct LinearFuzzyMatcher<T, M> {
    targets: Vec<T>,
    metric: M,
}

impl<T, M: Metric<T>> LinearFuzzyMatcher<T, M> {
    /// Store `targets` for scanning under `metric`.
    pub fn new<I>(targets: I, metric: M) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            targets: targets.into_iter().collect(),
            metric,
        }
    }

    /// Whether the matcher holds no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The number of targets constructed with.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Find the nearest element, or `None` if the matcher is empty.
    pub fn find_nearest<Q>(&self, target: &Q) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.scan(target, 1, f64::INFINITY).into_iter().next()
    }

    /// Find the nearest element within `limit`, or `None` if no element is
    /// that close.
    pub fn find_nearest_within<Q>(&self, target: &Q, limit: f64) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.scan(target, 1, limit).into_iter().next()
    }

    /// Find the `k` nearest elements, sorted by ascending distance.
    pub fn find_k_nearest<Q>(&self, target: &Q, k: usize) -> Result<Vec<Match<'_, T>>>
    where
        M: Metric<T, Q>,
    {
        self.find_k_nearest_within(target, k, f64::INFINITY)
    }

    /// Find the `k` nearest elements within `limit`, sorted by ascending
    /// distance.
    pub fn find_k_nearest_within<Q>(
        &self,
        target: &Q,
        k: usize,
        limit: f64,
    ) -> Result<Vec<Match<'_, T>>>
    where
        M: Metric<T, Q>,
    {
        if k == 0 {
            return Err(Error::ZeroNeighbors);
        }
        Ok(self.scan(target, k, limit))
    }

    /// Bounded max-heap scan: keep the `k` closest elements within `limit`.
    fn scan<Q>(&self, target: &Q, k: usize, limit: f64) -> Vec<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        let capacity = k.min(self.targets.len()).saturating_add(1);
        let mut matches: BinaryHeap<HeapMatch> = BinaryHeap::with_capacity(capacity);

        for (index, possible_match) in self.targets.iter().enumerate() {
            let current = self.metric.distance(possible_match, target);
            if current > limit {
                continue;
            }
            let worst = matches.peek().map(|m| m.distance);
            if matches.len() < k || worst.is_some_and(|w| current < w) {
                if matches.len() >= k {
                    matches.pop();
                }
                matches.push(HeapMatch {
                    distance: current,
                    index,
                });
            }
        }

        matches
            .into_sorted_vec()
            .into_iter()
            .map(|m| Match::new(&self.targets[m.index], m.distance))
            .collect()
    }
}
