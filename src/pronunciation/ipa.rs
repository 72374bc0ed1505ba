//! IPA letter table and parser.
//!
//! See <https://www.internationalphoneticassociation.org/> and
//! <https://en.wikipedia.org/wiki/International_Phonetic_Alphabet>.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::phone::{
    consonant, vowel, MannerOfArticulation::*, Phonation, Phone, PlaceOfArticulation::*,
    VowelBackness::*, VowelHeight::*,
};
use crate::pronunciation::Pronunciation;

use crate::phone::Phonation::{Modal, Voiceless};
use crate::phone::VowelRoundedness::{LessRounded, MoreRounded, Rounded, Unrounded};

const VOICED: Phonation = Modal;

/// Look up the encoded phone for an IPA base letter.
///
/// Returns `None` for anything that is not a base letter, including the
/// combining diacritics handled by the parser.
pub(crate) fn ipa_letter(c: char) -> Option<u16> {
    let bits = match c {
        // Pulmonic consonants

        // Bilabial
        'p' => consonant(Voiceless, Bilabial, Plosive),
        'b' => consonant(VOICED, Bilabial, Plosive),
        'm' => consonant(VOICED, Bilabial, Nasal),
        'ʙ' => consonant(VOICED, Bilabial, Trill),
        'ɸ' => consonant(Voiceless, Bilabial, NonSibilantFricative),
        'β' => consonant(VOICED, Bilabial, NonSibilantFricative),

        // Labiodental
        'ɱ' => consonant(VOICED, Labiodental, Nasal),
        'ⱱ' => consonant(VOICED, Labiodental, Flap),
        'f' => consonant(Voiceless, Labiodental, NonSibilantFricative),
        'v' => consonant(VOICED, Labiodental, NonSibilantFricative),
        'ʋ' => consonant(VOICED, Labiodental, Approximant),

        // Dental
        'θ' => consonant(Voiceless, Dental, NonSibilantFricative),
        'ð' => consonant(VOICED, Dental, NonSibilantFricative),

        // Alveolar
        't' => consonant(Voiceless, Alveolar, Plosive),
        'd' => consonant(VOICED, Alveolar, Plosive),
        'n' => consonant(VOICED, Alveolar, Nasal),
        'r' => consonant(VOICED, Alveolar, Trill),
        'ɾ' => consonant(VOICED, Alveolar, Flap),
        'ɺ' => consonant(VOICED, Alveolar, LateralFlap),
        's' => consonant(Voiceless, Alveolar, SibilantFricative),
        'z' => consonant(VOICED, Alveolar, SibilantFricative),
        'ɹ' => consonant(VOICED, Alveolar, Approximant),
        'ɬ' => consonant(Voiceless, Alveolar, LateralFricative),
        'ɮ' => consonant(VOICED, Alveolar, LateralFricative),
        'l' => consonant(VOICED, Alveolar, LateralApproximant),

        // Palato-alveolar
        'ʃ' => consonant(Voiceless, PalatoAlveolar, SibilantFricative),
        'ʒ' => consonant(VOICED, PalatoAlveolar, SibilantFricative),

        // Retroflex
        'ʈ' => consonant(Voiceless, Retroflex, Plosive),
        'ɖ' => consonant(VOICED, Retroflex, Plosive),
        'ɳ' => consonant(VOICED, Retroflex, Nasal),
        'ɽ' => consonant(VOICED, Retroflex, Flap),
        'ʂ' => consonant(Voiceless, Retroflex, SibilantFricative),
        'ʐ' => consonant(VOICED, Retroflex, SibilantFricative),
        'ɻ' => consonant(VOICED, Retroflex, Approximant),
        'ɭ' => consonant(VOICED, Retroflex, LateralApproximant),

        // Alveolo-palatal
        'ɕ' => consonant(Voiceless, AlveoloPalatal, SibilantFricative),
        'ʑ' => consonant(VOICED, AlveoloPalatal, SibilantFricative),

        // Labial-palatal
        'ɥ' => consonant(VOICED, LabialPalatal, Approximant),

        // Palatal
        'c' => consonant(Voiceless, Palatal, Plosive),
        'ɟ' => consonant(VOICED, Palatal, Plosive),
        'ɲ' => consonant(VOICED, Palatal, Nasal),
        'ç' => consonant(Voiceless, Palatal, NonSibilantFricative),
        'ʝ' => consonant(VOICED, Palatal, NonSibilantFricative),
        'j' => consonant(VOICED, Palatal, Approximant),
        'ʎ' => consonant(VOICED, Palatal, LateralApproximant),

        // Palatal-velar
        'ɧ' => consonant(Voiceless, PalatalVelar, NonSibilantFricative),

        // Labial-velar
        'ʍ' => consonant(Voiceless, LabialVelar, Approximant),
        'w' => consonant(VOICED, LabialVelar, Approximant),

        // Velar
        'k' => consonant(Voiceless, Velar, Plosive),
        'ɡ' => consonant(VOICED, Velar, Plosive),
        'ŋ' => consonant(VOICED, Velar, Nasal),
        'x' => consonant(Voiceless, Velar, NonSibilantFricative),
        'ɣ' => consonant(VOICED, Velar, NonSibilantFricative),
        'ɰ' => consonant(VOICED, Velar, Approximant),
        'ʟ' => consonant(VOICED, Velar, LateralApproximant),

        // Uvular
        'q' => consonant(Voiceless, Uvular, Plosive),
        'ɢ' => consonant(VOICED, Uvular, Plosive),
        'ɴ' => consonant(VOICED, Uvular, Nasal),
        'ʀ' => consonant(VOICED, Uvular, Trill),
        'χ' => consonant(Voiceless, Uvular, NonSibilantFricative),
        'ʁ' => consonant(VOICED, Uvular, NonSibilantFricative),

        // Pharyngeal
        'ħ' => consonant(Voiceless, Pharyngeal, NonSibilantFricative),
        'ʕ' => consonant(VOICED, Pharyngeal, NonSibilantFricative),

        // Epiglottal
        'ʡ' => consonant(VOICED, Epiglottal, Plosive),
        'ʜ' => consonant(Voiceless, Epiglottal, NonSibilantFricative),
        'ʢ' => consonant(VOICED, Epiglottal, NonSibilantFricative),

        // Glottal
        'ʔ' => consonant(Voiceless, Glottal, Plosive),
        'h' => consonant(Voiceless, Glottal, NonSibilantFricative),
        'ɦ' => consonant(VOICED, Glottal, NonSibilantFricative),

        // Non-pulmonic consonants
        'ʘ' => consonant(Voiceless, Bilabial, Click),
        'ǀ' => consonant(Voiceless, Dental, Click),
        'ǃ' => consonant(Voiceless, Alveolar, Click),
        'ǂ' => consonant(Voiceless, Palatal, Click),
        'ǁ' => consonant(Voiceless, Alveolar, Click),
        'ɓ' => consonant(VOICED, Bilabial, Implosive),
        'ɗ' => consonant(VOICED, Alveolar, Implosive),
        'ʄ' => consonant(VOICED, Palatal, Implosive),
        'ɠ' => consonant(VOICED, Velar, Implosive),
        'ʛ' => consonant(VOICED, Uvular, Implosive),

        // Vowels

        // Front
        'i' => vowel(Close, Front, Unrounded, false),
        'y' => vowel(Close, Front, Rounded, false),
        'e' => vowel(CloseMid, Front, Unrounded, false),
        'ø' => vowel(CloseMid, Front, Rounded, false),
        'ɛ' => vowel(OpenMid, Front, Unrounded, false),
        'œ' => vowel(OpenMid, Front, Rounded, false),
        'æ' => vowel(NearOpen, Front, Unrounded, false),
        'a' => vowel(Open, Front, Unrounded, false),
        'ɶ' => vowel(Open, Front, Rounded, false),

        // Near-front
        'ɪ' => vowel(NearClose, NearFront, Unrounded, false),
        'ʏ' => vowel(NearClose, NearFront, Rounded, false),

        // Central
        'ɨ' => vowel(Close, Central, Unrounded, false),
        'ʉ' => vowel(Close, Central, Rounded, false),
        'ɘ' => vowel(CloseMid, Central, Unrounded, false),
        'ɵ' => vowel(CloseMid, Central, Rounded, false),
        'ə' => vowel(Mid, Central, Unrounded, false),
        'ɜ' => vowel(OpenMid, Central, Unrounded, false),
        'ɞ' => vowel(OpenMid, Central, Rounded, false),
        'ɐ' => vowel(NearOpen, Central, Unrounded, false),

        // Central rhotic
        'ɚ' => vowel(Mid, Central, Unrounded, true),
        'ɝ' => vowel(OpenMid, Central, Unrounded, true),

        // Near-back
        'ʊ' => vowel(NearClose, NearBack, Rounded, false),

        // Back
        'ɯ' => vowel(Close, Back, Unrounded, false),
        'u' => vowel(Close, Back, Rounded, false),
        'ɤ' => vowel(CloseMid, Back, Unrounded, false),
        'o' => vowel(CloseMid, Back, Rounded, false),
        'ʌ' => vowel(OpenMid, Back, Unrounded, false),
        'ɔ' => vowel(OpenMid, Back, Rounded, false),
        'ɑ' => vowel(Open, Back, Unrounded, false),
        'ɒ' => vowel(Open, Back, Rounded, false),

        _ => return None,
    };
    Some(bits)
}

/// Apply a combining diacritic to the most recently parsed phone.
///
/// Returns `Ok(true)` when the code point is a known diacritic (and was
/// applied), `Ok(false)` when it is unknown and should be dropped. Rounding
/// and rhotic diacritics on a consonant surface the phone-type error.
fn apply_diacritic(phone: &mut Phone, c: char) -> Result<bool> {
    match c {
        // Syllabic (under, over)
        '\u{0329}' | '\u{030D}' => phone.set_syllabic(true),

        // Non-syllabic
        '\u{032F}' => phone.set_syllabic(false),

        // Voiceless (under, over). IPA has no diacritic for slack voice, so
        // a voiced phone with a voiceless diacritic means slack.
        '\u{0325}' | '\u{030A}' => {
            if phone.phonation() != Phonation::Voiceless {
                phone.set_phonation(Phonation::Slack);
            }
        }

        // Voiced. Likewise, an already voiced phone with a voiced diacritic
        // means stiff.
        '\u{032C}' => {
            if phone.phonation() == Phonation::Voiceless {
                phone.set_phonation(Phonation::Modal);
            } else {
                phone.set_phonation(Phonation::Stiff);
            }
        }

        // Breathy voiced
        '\u{0324}' => phone.set_phonation(Phonation::Breathy),

        // Creaky voiced
        '\u{0330}' => phone.set_phonation(Phonation::Creaky),

        // More rounded
        '\u{0339}' => {
            let next = match phone.roundedness()? {
                Unrounded => LessRounded,
                LessRounded => Rounded,
                Rounded | MoreRounded => MoreRounded,
            };
            phone.set_roundedness(next)?;
        }

        // Less rounded
        '\u{031C}' => {
            let next = match phone.roundedness()? {
                Unrounded | LessRounded => Unrounded,
                Rounded => LessRounded,
                MoreRounded => Rounded,
            };
            phone.set_roundedness(next)?;
        }

        // Rhotacized
        '\u{02DE}' => phone.set_rhotic(true)?,

        _ => return Ok(false),
    }
    Ok(true)
}

/// Parse an IPA string into a [`Pronunciation`].
///
/// Base letters push phones, the known diacritics modify the last phone,
/// and anything else is skipped without being retained in the stored text.
pub(super) fn parse_ipa(ipa: &str) -> Result<Pronunciation> {
    let mut phones: SmallVec<[Phone; 16]> = SmallVec::new();
    let mut text = String::with_capacity(ipa.len());

    for c in ipa.chars() {
        if let Some(bits) = ipa_letter(c) {
            phones.push(Phone::from_bits(bits));
        } else if let Some(last) = phones.last_mut() {
            if !apply_diacritic(last, c)? {
                continue;
            }
        } else {
            return Err(Error::UnexpectedCharacter(c));
        }
        text.push(c);
    }

    Ok(Pronunciation::from_parts(text, phones))
}
