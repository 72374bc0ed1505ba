//! Error types for phonetic matching operations.

use thiserror::Error;

/// Errors that can occur while parsing pronunciations or querying matchers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An ARPAbet token was not found in the phoneme table.
    ///
    /// Raised by [`Pronunciation::from_arpabet`](crate::pronunciation::Pronunciation::from_arpabet)
    /// after case folding and stress-digit stripping.
    #[error("Unrecognized ARPABET phoneme `{0}`")]
    UnrecognizedPhoneme(String),

    /// An IPA string began with a character that is neither a known base
    /// letter nor attached to a preceding phone.
    ///
    /// Combining diacritics modify the most recently parsed phone, so a
    /// pronunciation cannot start with one.
    #[error("Unexpected `{0}`")]
    UnexpectedCharacter(char),

    /// A consonant-only feature was accessed on a vowel.
    #[error("This phone is not a consonant.")]
    NotAConsonant,

    /// A vowel-only feature was accessed on a consonant.
    #[error("This phone is not a vowel.")]
    NotAVowel,

    /// A hybrid weight outside the unit interval was supplied.
    #[error("require 0 <= phonetic_weight_percentage <= 1, got {0}")]
    WeightOutOfRange(f64),

    /// A nearest-neighbor query asked for zero results.
    #[error("k must be > 0")]
    ZeroNeighbors,
}

/// A specialized `Result` type for phonetic matching operations.
pub type Result<T> = std::result::Result<T, Error>;
