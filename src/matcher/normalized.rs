//! Matcher façades that normalize distances by query length.
//!
//! Front-ends usually work with a fractional threshold (0 for exact match,
//! around 1 when nothing matches) regardless of how long the query is.
//! These façades compute a per-query `scale`, search the underlying
//! matcher within `threshold * scale`, and report `raw / scale`, so the
//! same threshold value behaves consistently across query lengths.

use crate::distance::{DistanceInput, EnHybridDistance, EnPhoneticDistance, StringDistance};
use crate::error::Result;
use crate::matcher::{Backend, Entry, FuzzyIndex, Match};
use crate::pronouncer::Pronouncer;
use crate::pronunciation::Pronunciation;

fn char_len(phrase: &str) -> f64 {
    phrase.chars().count() as f64
}

/// Search within `limit * scale` and report distances divided by `scale`.
fn find_normalized<'a, T, E, D>(
    index: &'a FuzzyIndex<T, E, D>,
    query: &E,
    k: usize,
    limit: f64,
    scale: f64,
) -> Result<Vec<Match<'a, T>>>
where
    D: crate::distance::Metric<E>,
{
    let scale = if scale == 0.0 { 1.0 } else { scale };
    let matches = index.find_k_nearest_within(query, k, limit * scale)?;
    Ok(matches
        .into_iter()
        .map(|m| Match::new(&m.element().target, m.distance() / scale))
        .collect())
}

/// A string fuzzy matcher which normalizes results based on the length of
/// queries.
///
/// # Example
///
/// ```rust
/// use phonmatch::matcher::StringFuzzyMatcher;
///
/// let names = vec!["Andrew Smith", "Andrew", "John B", "John C", "Jennifer"];
/// let matcher = StringFuzzyMatcher::new(names, |name: &&str| name.to_string());
///
/// let nearest = matcher.find_nearest("john b").unwrap();
/// assert_eq!(*nearest.element(), "John B");
/// ```
pub struct StringFuzzyMatcher<T> {
    index: FuzzyIndex<T, String, StringDistance>,
}

impl<T> StringFuzzyMatcher<T> {
    /// Build an accelerated matcher over `targets`.
    ///
    /// `extract` maps each target to the phrase it is matched by. The
    /// order of equal targets is not guaranteed to be preserved.
    pub fn new<I, F>(targets: I, extract: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        Self::with_backend(targets, extract, Backend::default())
    }

    /// Build a matcher over `targets` with an explicit backend.
    pub fn with_backend<I, F>(targets: I, extract: F, backend: Backend) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        let entries = targets
            .into_iter()
            .map(|target| {
                let extraction = extract(&target);
                Entry { target, extraction }
            })
            .collect();
        Self {
            index: FuzzyIndex::new(entries, StringDistance::new(), backend),
        }
    }

    /// Whether the matcher holds no targets.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The number of targets constructed with.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Find the nearest element, or `None` if the matcher is empty.
    pub fn find_nearest(&self, query: &str) -> Option<Match<'_, T>> {
        self.find_nearest_within(query, f64::INFINITY)
    }

    /// Find the nearest element within `threshold`.
    pub fn find_nearest_within(&self, query: &str, threshold: f64) -> Option<Match<'_, T>> {
        self.search(query, 1, threshold).ok()?.into_iter().next()
    }

    /// Find the `k` nearest elements.
    pub fn find_k_nearest(&self, query: &str, k: usize) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, f64::INFINITY)
    }

    /// Find the `k` nearest elements within `threshold`.
    pub fn find_k_nearest_within(
        &self,
        query: &str,
        k: usize,
        threshold: f64,
    ) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, threshold)
    }

    fn search(&self, query: &str, k: usize, threshold: f64) -> Result<Vec<Match<'_, T>>> {
        let scale = char_len(query);
        find_normalized(&self.index, &query.to_string(), k, threshold, scale)
    }
}

/// An English phonetic fuzzy matcher which normalizes results based on the
/// length of query pronunciations.
///
/// Targets and queries are pronounced through the supplied [`Pronouncer`];
/// matching is purely acoustic, so lexically distant spellings of similar
/// sounds (e.g. "bee" and "B") land close together.
pub struct EnPhoneticFuzzyMatcher<T, P> {
    index: FuzzyIndex<T, Pronunciation, EnPhoneticDistance>,
    pronouncer: P,
}

impl<T, P: Pronouncer> EnPhoneticFuzzyMatcher<T, P> {
    /// Build an accelerated matcher over `targets`, pronouncing each
    /// extracted phrase.
    pub fn new<I, F>(targets: I, extract: F, pronouncer: P) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        Self::with_backend(targets, extract, pronouncer, Backend::default())
    }

    /// Build a matcher over `targets` with an explicit backend.
    pub fn with_backend<I, F>(targets: I, extract: F, pronouncer: P, backend: Backend) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        let entries = targets
            .into_iter()
            .map(|target| {
                let extraction = pronouncer.pronounce(&extract(&target))?;
                Ok(Entry { target, extraction })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            index: FuzzyIndex::new(entries, EnPhoneticDistance::new(), backend),
            pronouncer,
        })
    }

    /// Whether the matcher holds no targets.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The number of targets constructed with.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Find the nearest element, or `None` if the matcher is empty.
    pub fn find_nearest(&self, query: &str) -> Result<Option<Match<'_, T>>> {
        self.find_nearest_within(query, f64::INFINITY)
    }

    /// Find the nearest element within `threshold`.
    pub fn find_nearest_within(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<Option<Match<'_, T>>> {
        Ok(self.search(query, 1, threshold)?.into_iter().next())
    }

    /// Find the `k` nearest elements.
    pub fn find_k_nearest(&self, query: &str, k: usize) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, f64::INFINITY)
    }

    /// Find the `k` nearest elements within `threshold`.
    pub fn find_k_nearest_within(
        &self,
        query: &str,
        k: usize,
        threshold: f64,
    ) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, threshold)
    }

    fn search(&self, query: &str, k: usize, threshold: f64) -> Result<Vec<Match<'_, T>>> {
        let pronunciation = self.pronouncer.pronounce(query)?;
        let scale = pronunciation.len() as f64;
        find_normalized(&self.index, &pronunciation, k, threshold, scale)
    }
}

/// An English hybrid fuzzy matcher which normalizes results based on the
/// length of queries.
///
/// Combines phonetic and lexical distance with the configured weight; the
/// threshold scale interpolates the same way:
/// `w * |pronunciation| + (1 - w) * |phrase|`.
pub struct EnHybridFuzzyMatcher<T, P> {
    index: FuzzyIndex<T, DistanceInput, EnHybridDistance>,
    pronouncer: P,
    phonetic_weight_percentage: f64,
}

impl<T, P: Pronouncer> EnHybridFuzzyMatcher<T, P> {
    /// Build an accelerated matcher over `targets`.
    ///
    /// `phonetic_weight_percentage` trades off between the phonetic and
    /// lexical scores (1 meaning 100% phonetic, 0 meaning 100% lexical)
    /// and must lie in `[0, 1]`.
    pub fn new<I, F>(
        targets: I,
        phonetic_weight_percentage: f64,
        extract: F,
        pronouncer: P,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        Self::with_backend(
            targets,
            phonetic_weight_percentage,
            extract,
            pronouncer,
            Backend::default(),
        )
    }

    /// Build a matcher over `targets` with an explicit backend.
    pub fn with_backend<I, F>(
        targets: I,
        phonetic_weight_percentage: f64,
        extract: F,
        pronouncer: P,
        backend: Backend,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        let distance = EnHybridDistance::new(phonetic_weight_percentage)?;
        let entries = targets
            .into_iter()
            .map(|target| {
                let phrase = extract(&target);
                let pronunciation = pronouncer.pronounce(&phrase)?;
                Ok(Entry {
                    target,
                    extraction: DistanceInput::new(phrase, pronunciation),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            index: FuzzyIndex::new(entries, distance, backend),
            pronouncer,
            phonetic_weight_percentage,
        })
    }

    /// The phonetic weight percentage being used.
    pub fn phonetic_weight_percentage(&self) -> f64 {
        self.phonetic_weight_percentage
    }

    /// Whether the matcher holds no targets.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The number of targets constructed with.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Find the nearest element, or `None` if the matcher is empty.
    pub fn find_nearest(&self, query: &str) -> Result<Option<Match<'_, T>>> {
        self.find_nearest_within(query, f64::INFINITY)
    }

    /// Find the nearest element within `threshold`.
    pub fn find_nearest_within(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<Option<Match<'_, T>>> {
        Ok(self.search(query, 1, threshold)?.into_iter().next())
    }

    /// Find the `k` nearest elements.
    pub fn find_k_nearest(&self, query: &str, k: usize) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, f64::INFINITY)
    }

    /// Find the `k` nearest elements within `threshold`.
    pub fn find_k_nearest_within(
        &self,
        query: &str,
        k: usize,
        threshold: f64,
    ) -> Result<Vec<Match<'_, T>>> {
        self.search(query, k, threshold)
    }

    fn search(&self, query: &str, k: usize, threshold: f64) -> Result<Vec<Match<'_, T>>> {
        let w = self.phonetic_weight_percentage;
        let pronunciation = self.pronouncer.pronounce(query)?;
        let scale = w * pronunciation.len() as f64 + (1.0 - w) * char_len(query);
        let input = DistanceInput::new(query, pronunciation);
        find_normalized(&self.index, &input, k, threshold, scale)
    }
}
