//! ARPAbet phoneme table and parser.
//!
//! ARPAbet is the ASCII phoneme set used by American English lexicons and
//! speech front-ends (e.g. CMUdict). Tokens are translated to IPA fragments
//! and the concatenation is parsed by the IPA codec, so every ARPAbet
//! pronunciation is also a well-formed IPA pronunciation.

use crate::error::{Error, Result};
use crate::pronunciation::{ipa, Pronunciation};

/// Map an ARPAbet phoneme to its IPA fragment.
fn arpabet_to_ipa(phoneme: &str) -> Option<&'static str> {
    let fragment = match phoneme {
        // Vowels

        // Monophthongs
        "AO" => "ɔ",
        "AA" => "ɑ",
        "IY" => "i",
        "UW" => "u",
        "EH" => "ɛ",
        "IH" => "ɪ",
        "UH" => "ʊ",
        "AH" => "ʌ",
        "AX" => "ə",
        "AE" => "æ",

        // Diphthongs
        "EY" => "eɪ\u{032F}",
        "AY" => "aɪ\u{032F}",
        "OW" => "oʊ\u{032F}",
        "AW" => "aʊ\u{032F}",
        "OY" => "ɔɪ\u{032F}",

        // Rhotic
        "ER" => "ɝ",
        "AXR" => "ɚ",

        // Consonants

        // Stops
        "P" => "p",
        "B" => "b",
        "T" => "t",
        "D" => "d",
        "K" => "k",
        "G" => "ɡ",

        // Affricates
        "CH" => "tʃ",
        "JH" => "dʒ",

        // Fricatives
        "F" => "f",
        "V" => "v",
        "TH" => "θ",
        "DH" => "ð",
        "S" => "s",
        "Z" => "z",
        "SH" => "ʃ",
        "ZH" => "ʒ",
        "HH" => "h",

        // Nasals
        "M" => "m",
        "EM" => "m\u{0329}",
        "N" => "n",
        "EN" => "n\u{0329}",
        "NG" => "ŋ",
        "ENG" => "ŋ\u{030D}",

        // Liquids
        "L" => "lˠ",
        "EL" => "l\u{0329}ˠ",
        "R" => "r",
        "DX" => "ɾ",
        "NX" => "ɾ\u{0303}",

        // Semivowels
        "Y" => "j",
        "W" => "w",
        "Q" => "ʔ",

        // Suprasegmentals
        " " => " ",

        _ => return None,
    };
    Some(fragment)
}

/// Parse a sequence of ARPAbet tokens into a [`Pronunciation`].
///
/// Tokens are case-folded to upper and a single trailing stress digit in
/// `0..=2` is stripped and discarded. Unknown tokens are rejected.
pub(super) fn parse_arpabet<I, S>(arpabet: I) -> Result<Pronunciation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ipa = String::new();

    for phoneme in arpabet {
        let mut token = phoneme.as_ref().to_ascii_uppercase();

        if let Some(last) = token.chars().last() {
            if ('0'..='2').contains(&last) {
                token.pop();
            }
        }

        match arpabet_to_ipa(&token) {
            Some(fragment) => ipa.push_str(fragment),
            None => return Err(Error::UnrecognizedPhoneme(token)),
        }
    }

    ipa::parse_ipa(&ipa)
}
