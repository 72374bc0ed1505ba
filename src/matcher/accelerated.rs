//! Fuzzy matcher accelerated by a vantage point tree.

use crate::distance::Metric;
use crate::error::{Error, Result};
use crate::matcher::Match;
use crate::vptree::VpTree;

/// A fuzzy matcher that indexes its targets in a [`VpTree`] so each query
/// only evaluates the metric against a fraction of the stored elements.
///
/// Construction costs `O(n log n)` metric evaluations; queries prune by
/// the triangle inequality. Results are identical to
/// [`LinearFuzzyMatcher`](crate::matcher::LinearFuzzyMatcher) for the
/// same targets and metric (ties may order differently).
pub struct AcceleratedFuzzyMatcher<T, M> {
    tree: VpTree<T, M>,
}

impl<T, M: Metric<T>> AcceleratedFuzzyMatcher<T, M> {
    /// Index `targets` under `metric`.
    ///
    /// The order of equal targets is not guaranteed to be preserved.
    pub fn new<I>(targets: I, metric: M) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            tree: VpTree::new(targets, metric),
        }
    }

    /// Whether the matcher holds no targets.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of targets constructed with.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Find the nearest element, or `None` if the matcher is empty.
    pub fn find_nearest<Q>(&self, target: &Q) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.tree
            .find_nearest_within(target, f64::INFINITY)
            .map(|m| Match::new(m.element(), m.distance()))
    }

    /// Find the nearest element within `limit`, or `None` if no element is
    /// that close.
    pub fn find_nearest_within<Q>(&self, target: &Q, limit: f64) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.tree
            .find_nearest_within(target, limit)
            .map(|m| Match::new(m.element(), m.distance()))
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
        Ok(self
            .tree
            .find_k_nearest_within(target, k, limit)
            .into_iter()
            .map(|m| Match::new(m.element(), m.distance()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::string_distance;

    fn metric(a: &&str, b: &&str) -> f64 {
        string_distance(a, b) as f64
    }

    fn matcher(
        words: &[&'static str],
    ) -> AcceleratedFuzzyMatcher<&'static str, fn(&&str, &&str) -> f64> {
        AcceleratedFuzzyMatcher::new(words.iter().copied(), metric as fn(&&str, &&str) -> f64)
    }

    #[test]
    fn test_empty() {
        let matcher = matcher(&[]);
        assert!(matcher.is_empty());
        assert_eq!(matcher.len(), 0);
        assert!(matcher.find_nearest(&"cat").is_none());
    }

    #[test]
    fn test_zero_k_rejected() {
        let matcher = matcher(&["cat"]);
        assert_eq!(
            matcher.find_k_nearest(&"cat", 0).unwrap_err(),
            Error::ZeroNeighbors
        );
    }

    #[test]
    fn test_nearest_exact() {
        let matcher = matcher(&["cat", "bat", "rat", "dog"]);
        let nearest = matcher.find_nearest(&"cat").unwrap();
        assert_eq!(*nearest.element(), "cat");
        assert_eq!(nearest.distance(), 0.0);
    }

    #[test]
    fn test_within_zero() {
        let matcher = matcher(&["cat", "bat", "rat", "dog"]);
        let matches = matcher.find_k_nearest_within(&"cat", 10, 0.0).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0].element(), "cat");
    }
}
