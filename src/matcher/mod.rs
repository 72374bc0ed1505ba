//! Fuzzy matchers over fixed target sets.
//!
//! Two interchangeable backends provide the matcher capability set
//! (`is_empty`, `len`, and the `find_*` family): a linear full-scan
//! matcher for reference use and small target sets, and an accelerated
//! matcher backed by a vantage point tree. Both accept any
//! [`Metric`](crate::distance::Metric), including plain closures.
//!
//! On top of the raw matchers, the normalizing façades
//! ([`StringFuzzyMatcher`], [`EnPhoneticFuzzyMatcher`],
//! [`EnHybridFuzzyMatcher`]) adapt string queries into the right
//! representation and scale thresholds per query, and
//! [`EnContactMatcher`] packages domain knowledge about contact lists.

mod accelerated;
mod contact;
mod linear;
mod normalized;

pub use accelerated::AcceleratedFuzzyMatcher;
pub use contact::{ContactFields, ContactMatcherConfig, EnContactMatcher};
pub use linear::LinearFuzzyMatcher;
pub use normalized::{EnHybridFuzzyMatcher, EnPhoneticFuzzyMatcher, StringFuzzyMatcher};

use crate::distance::Metric;
use crate::error::Result;

/// A match found by a fuzzy matcher.
///
/// Borrows the matched element from its matcher, so matches are valid for
/// as long as the matcher is alive.
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

/// Which matcher implementation a façade builds at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Full scan over all targets per query.
    Linear,
    /// Vantage-point-tree index.
    #[default]
    Accelerated,
}

/// A stored target paired with the extraction the metric compares.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T, E> {
    pub(crate) target: T,
    pub(crate) extraction: E,
}

/// Lifts a metric on extractions to entries, for both entry-to-entry
/// comparisons (index construction) and entry-to-query comparisons.
#[derive(Debug, Clone)]
pub(crate) struct ByExtraction<D>(pub(crate) D);

impl<T, E, D: Metric<E>> Metric<Entry<T, E>> for ByExtraction<D> {
    fn distance(&self, a: &Entry<T, E>, b: &Entry<T, E>) -> f64 {
        self.0.distance(&a.extraction, &b.extraction)
    }
}

impl<T, E, D: Metric<E>> Metric<Entry<T, E>, E> for ByExtraction<D> {
    fn distance(&self, a: &Entry<T, E>, b: &E) -> f64 {
        self.0.distance(&a.extraction, b)
    }
}

/// The two matcher variants behind one face, selected at construction.
pub(crate) enum FuzzyIndex<T, E, D> {
    Linear(LinearFuzzyMatcher<Entry<T, E>, ByExtraction<D>>),
    Accelerated(AcceleratedFuzzyMatcher<Entry<T, E>, ByExtraction<D>>),
}

impl<T, E, D: Metric<E>> FuzzyIndex<T, E, D> {
    pub(crate) fn new(entries: Vec<Entry<T, E>>, metric: D, backend: Backend) -> Self {
        let metric = ByExtraction(metric);
        match backend {
            Backend::Linear => Self::Linear(LinearFuzzyMatcher::new(entries, metric)),
            Backend::Accelerated => {
                Self::Accelerated(AcceleratedFuzzyMatcher::new(entries, metric))
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Self::Linear(matcher) => matcher.is_empty(),
            Self::Accelerated(matcher) => matcher.is_empty(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Linear(matcher) => matcher.len(),
            Self::Accelerated(matcher) => matcher.len(),
        }
    }

    pub(crate) fn find_k_nearest_within(
        &self,
        query: &E,
        k: usize,
        limit: f64,
    ) -> Result<Vec<Match<'_, Entry<T, E>>>> {
        match self {
            Self::Linear(matcher) => matcher.find_k_nearest_within(query, k, limit),
            Self::Accelerated(matcher) => matcher.find_k_nearest_within(query, k, limit),
        }
    }
}
