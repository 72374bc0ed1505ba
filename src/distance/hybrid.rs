//! Hybrid distance combining strings and phonemes.

use crate::distance::{EnPhoneticDistance, Metric, StringDistance};
use crate::error::{Error, Result};
use crate::pronunciation::Pronunciation;

/// Input for [`EnHybridDistance`]: a phrase together with its pronunciation.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceInput {
    /// The lexical form.
    pub phrase: String,
    /// The phonetic form.
    pub pronunciation: Pronunciation,
}

impl DistanceInput {
    /// Pair a phrase with its pronunciation.
    pub fn new(phrase: impl Into<String>, pronunciation: Pronunciation) -> Self {
        Self {
            phrase: phrase.into(),
            pronunciation,
        }
    }
}

/// A weighted combination of phonetic and lexical distance.
///
/// The phonetic weight trades off between the two component scores:
/// 1 means 100% phonetic score, 0 means 100% lexical score. At either
/// extreme the unused component is not computed at all.
///
/// # Example
///
/// ```rust
/// use phonmatch::distance::{DistanceInput, EnHybridDistance};
/// use phonmatch::Pronunciation;
///
/// let cat = DistanceInput::new("cat", Pronunciation::from_ipa("kæt").unwrap());
/// let bat = DistanceInput::new("bat", Pronunciation::from_ipa("bæt").unwrap());
///
/// let metric = EnHybridDistance::new(0.5).unwrap();
/// assert!(metric.distance(&cat, &bat) > 0.0);
/// assert_eq!(metric.distance(&cat, &cat), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EnHybridDistance {
    phonetic_weight_percentage: f64,
    string_distance: StringDistance,
    phonetic_distance: EnPhoneticDistance,
}

impl EnHybridDistance {
    /// Create a hybrid distance with the given phonetic weight.
    ///
    /// Weights outside `[0, 1]` are rejected.
    pub fn new(phonetic_weight_percentage: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&phonetic_weight_percentage) {
            return Err(Error::WeightOutOfRange(phonetic_weight_percentage));
        }
        Ok(Self {
            phonetic_weight_percentage,
            string_distance: StringDistance::new(),
            phonetic_distance: EnPhoneticDistance::new(),
        })
    }

    /// The phonetic weight percentage being used.
    pub fn phonetic_weight_percentage(&self) -> f64 {
        self.phonetic_weight_percentage
    }

    /// The combined phonetic and lexical distance between `a` and `b`.
    pub fn distance(&self, a: &DistanceInput, b: &DistanceInput) -> f64 {
        let w = self.phonetic_weight_percentage;

        let mut phonetic_score = 0.0;
        let mut string_score = 0.0;
        if w > 0.0 {
            phonetic_score = w * self
                .phonetic_distance
                .distance(&a.pronunciation, &b.pronunciation);
        }
        if w < 1.0 {
            string_score = (1.0 - w) * self.string_distance.distance(&a.phrase, &b.phrase);
        }
        phonetic_score + string_score
    }
}

impl Metric<DistanceInput> for EnHybridDistance {
    fn distance(&self, a: &DistanceInput, b: &DistanceInput) -> f64 {
        EnHybridDistance::distance(self, a, b)
    }
}
