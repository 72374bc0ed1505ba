//! Vantage point trees.
//!
//! A VP-tree indexes elements of an arbitrary metric space for
//! k-nearest-neighbor search. Nodes are stored contiguously and subtrees
//! are addressed by index ranges rather than pointers: the subtree rooted
//! at index `r` occupies `[r, r + subtree_size)`, with the left child
//! subtree at `[r + 1, r + 1 + left_size)` and the right subtree following
//! it. This keeps construction and search cache-friendly and the tree free
//! of cyclic ownership.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::distance::Metric;

struct Node<T> {
    element: T,
    radius: f64,
    left_size: usize,
}

/// A match found in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a, T> {
    element: &'a T,
    distance: f64,
}

impl<'a, T> Match<'a, T> {
    pub(crate) fn new(element: &'a T, distance: f64) -> Self {
        Self { element, distance }
    }

    /// The found element.
    pub fn element(&self) -> &'a T {
        self.element
    }

    /// The metric distance from the query to this element.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// Bounded max-heap entry; the root is the current worst kept match.
pub(crate) struct HeapMatch {
    pub(crate) distance: f64,
    pub(crate) index: usize,
}

impl PartialEq for HeapMatch {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapMatch {}

impl PartialOrd for HeapMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// An entry in the search stack: the node range to visit, and the bounds
/// `a`, `b` such that the visit is necessary iff `a <= b + tau`.
type SearchFrame = (usize, usize, f64, f64);

/// A vantage point tree over elements of type `T` under metric `M`.
///
/// Built once from a collection and a metric, then queried any number of
/// times. Queries may use a different type than the stored elements as
/// long as the metric accepts the pair.
pub struct VpTree<T, M> {
    nodes: Vec<Node<T>>,
    metric: M,
}

impl<T, M: Metric<T>> VpTree<T, M> {
    /// Build a tree over `elements` compared by `metric`.
    ///
    /// The order of equal elements is not preserved.
    pub fn new<I>(elements: I, metric: M) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let nodes = elements
            .into_iter()
            .map(|element| Node {
                element,
                radius: 0.0,
                left_size: 0,
            })
            .collect();
        let mut tree = Self { nodes, metric };
        tree.build();
        tree
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of stored elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Partition every `[first, last)` range so that the element nearest
    /// the front becomes the vantage, the median-by-distance splits the
    /// rest, and the range layout invariant holds for both halves.
    fn build(&mut self) {
        let len = self.nodes.len();
        let nodes = &mut self.nodes;
        let metric = &self.metric;

        let mut stack = vec![(0usize, len)];
        while let Some((first, last)) = stack.pop() {
            if last - first <= 1 {
                continue;
            }

            // begin = first + 1; mid is the median of [begin, last).
            let (head, tail) = nodes.split_at_mut(first + 1);
            let vantage = &head[first].element;
            let span = &mut tail[..last - first - 1];
            let mid = span.len() / 2;

            span.select_nth_unstable_by(mid, |a, b| {
                metric
                    .distance(vantage, &a.element)
                    .total_cmp(&metric.distance(vantage, &b.element))
            });

            let radius = metric.distance(vantage, &span[mid].element);
            head[first].radius = radius;
            head[first].left_size = mid;

            let mid_index = first + 1 + mid;
            stack.push((mid_index, last));
            stack.push((first + 1, mid_index));
        }
    }

    /// Find the nearest element in the tree.
    ///
    /// Returns `None` iff the tree is empty.
    pub fn find_nearest<Q>(&self, target: &Q) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.find_k_nearest(target, 1).into_iter().next()
    }

    /// Find the nearest element within `limit` of `target`.
    pub fn find_nearest_within<Q>(&self, target: &Q, limit: f64) -> Option<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        self.find_k_nearest_within(target, 1, limit).into_iter().next()
    }

    /// Find the `k` nearest elements to `target`, sorted by ascending
    /// distance.
    ///
    /// The search radius starts at zero and only widens once `k` matches
    /// have been accumulated. For non-negative metrics this returns the
    /// same elements as an unbounded `find_k_nearest_within`, with tighter
    /// pruning during the initial fill.
    pub fn find_k_nearest<Q>(&self, target: &Q, k: usize) -> Vec<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        let mut matches: BinaryHeap<HeapMatch> = BinaryHeap::new();
        let mut tau = 0.0f64;

        let mut stack: Vec<SearchFrame> = vec![(0, self.nodes.len(), 0.0, 0.0)];
        while let Some((first, last, a, b)) = stack.pop() {
            if first == last || (matches.len() == k && a > b + tau) {
                continue;
            }

            let node = &self.nodes[first];
            let distance = self.metric.distance(&node.element, target);
            if matches.len() < k || distance <= tau {
                if matches.len() == k {
                    matches.pop();
                }
                matches.push(HeapMatch {
                    distance,
                    index: first,
                });
                if let Some(worst) = matches.peek() {
                    tau = worst.distance;
                }
            }

            self.descend(&mut stack, first, last, distance, node);
        }

        self.collect_matches(matches)
    }

    /// Find the `k` nearest elements to `target` within `limit`, sorted by
    /// ascending distance.
    pub fn find_k_nearest_within<Q>(&self, target: &Q, k: usize, limit: f64) -> Vec<Match<'_, T>>
    where
        M: Metric<T, Q>,
    {
        let mut matches: BinaryHeap<HeapMatch> = BinaryHeap::new();
        let mut tau = limit;

        let mut stack: Vec<SearchFrame> = vec![(0, self.nodes.len(), 0.0, 0.0)];
        while let Some((first, last, a, b)) = stack.pop() {
            if first == last || a > b + tau {
                continue;
            }

            let node = &self.nodes[first];
            let distance = self.metric.distance(&node.element, target);
            if distance <= tau {
                if matches.len() == k {
                    matches.pop();
                }
                matches.push(HeapMatch {
                    distance,
                    index: first,
                });
                if matches.len() == k {
                    if let Some(worst) = matches.peek() {
                        tau = worst.distance;
                    }
                }
            }

            self.descend(&mut stack, first, last, distance, node);
        }

        self.collect_matches(matches)
    }

    /// Push the child ranges, nearer side last so it is searched first.
    fn descend(
        &self,
        stack: &mut Vec<SearchFrame>,
        first: usize,
        last: usize,
        distance: f64,
        node: &Node<T>,
    ) {
        let left = first + 1;
        if left == last {
            return;
        }

        let mid = left + node.left_size;
        let radius = node.radius;

        if distance < radius {
            stack.push((mid, last, radius, distance));
            stack.push((left, mid, distance, radius));
        } else {
            stack.push((left, mid, distance, radius));
            stack.push((mid, last, radius, distance));
        }
    }

    fn collect_matches(&self, matches: BinaryHeap<HeapMatch>) -> Vec<Match<'_, T>> {
        matches
            .into_sorted_vec()
            .into_iter()
            .map(|m| Match::new(&self.nodes[m.index].element, m.distance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::string_distance;

    fn metric(a: &&str, b: &&str) -> f64 {
        string_distance(a, b) as f64
    }

    fn tree(words: &[&'static str]) -> VpTree<&'static str, fn(&&str, &&str) -> f64> {
        VpTree::new(words.iter().copied(), metric as fn(&&str, &&str) -> f64)
    }

    #[test]
    fn test_empty_tree() {
        let tree = tree(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.find_nearest(&"cat").is_none());
        assert!(tree.find_k_nearest(&"cat", 3).is_empty());
    }

    #[test]
    fn test_exact_member_is_nearest() {
        let tree = tree(&["cat", "bat", "rat", "dog"]);
        let nearest = tree.find_nearest(&"cat").unwrap();
        assert_eq!(*nearest.element(), "cat");
        assert_eq!(nearest.distance(), 0.0);
    }

    #[test]
    fn test_k_nearest_sorted_ascending() {
        let tree = tree(&["cat", "bat", "rat", "dog"]);
        let matches = tree.find_k_nearest(&"cat", 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(*matches[0].element(), "cat");
        assert_eq!(matches[0].distance(), 0.0);
        assert_eq!(matches[1].distance(), 1.0);
        assert!(["bat", "rat"].contains(matches[1].element()));
    }

    #[test]
    fn test_within_zero_limit() {
        let tree = tree(&["cat", "bat", "rat", "dog"]);
        let matches = tree.find_k_nearest_within(&"cat", 10, 0.0);
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0].element(), "cat");
    }

    #[test]
    fn test_within_negative_limit_is_unreachable() {
        let tree = tree(&["cat", "bat"]);
        assert!(tree.find_k_nearest_within(&"cat", 10, -1.0).is_empty());
        assert!(tree.find_nearest_within(&"cat", -0.5).is_none());
    }

    #[test]
    fn test_k_larger_than_size() {
        let tree = tree(&["cat", "bat", "rat"]);
        let matches = tree.find_k_nearest(&"cat", 10);
        assert_eq!(matches.len(), 3);
        let distances: Vec<f64> = matches.iter().map(Match::distance).collect();
        let mut sorted = distances.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(distances, sorted);
    }

    #[test]
    fn test_matches_full_scan() {
        let words = [
            "cat", "bat", "rat", "dog", "cot", "cart", "catch", "hat", "gnat", "coat",
        ];
        let tree = tree(&words);

        for query in ["cat", "cap", "zzz", "co", ""] {
            let matches = tree.find_k_nearest(&query, 3);
            let mut brute: Vec<f64> = words
                .iter()
                .map(|w| string_distance(w, query) as f64)
                .collect();
            brute.sort_by(f64::total_cmp);

            assert_eq!(matches.len(), 3, "query {query:?}");
            for (m, expected) in matches.iter().zip(&brute) {
                assert_eq!(m.distance(), *expected, "query {query:?}");
            }
        }
    }
}
