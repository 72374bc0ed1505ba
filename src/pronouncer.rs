//! The grapheme-to-phoneme collaborator contract.

use crate::error::Result;
use crate::pronunciation::Pronunciation;

/// Converts phrases into pronunciations.
///
/// Implementations typically wrap a text-to-speech front-end's lexicon and
/// letter-to-sound rules; this crate only consumes the contract. An
/// implementation must be deterministic (same phrase, same pronunciation)
/// and must not perform network I/O, since it is invoked synchronously for
/// every target at matcher construction and for every query.
pub trait Pronouncer {
    /// Pronounce a phrase.
    fn pronounce(&self, phrase: &str) -> Result<Pronunciation>;
}

impl<P: Pronouncer + ?Sized> Pronouncer for &P {
    fn pronounce(&self, phrase: &str) -> Result<Pronunciation> {
        (**self).pronounce(phrase)
    }
}
