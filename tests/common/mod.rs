//! Shared test fixtures.

use std::collections::HashMap;
use std::sync::Arc;

use phonmatch::{Pronouncer, Pronunciation, Result};

/// A deterministic pronouncer backed by a small ARPAbet lexicon, with a
/// naive letter-to-sound fallback so it is total over arbitrary phrases.
///
/// Production deployments wrap a real text-to-speech front-end; tests only
/// need stable, plausible pronunciations.
#[derive(Clone)]
pub struct LexiconPronouncer {
    words: Arc<HashMap<&'static str, Vec<&'static str>>>,
}

impl LexiconPronouncer {
    pub fn new() -> Self {
        let mut words: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        let entries: &[(&str, &[&str])] = &[
            // Letter names, for spelled-out queries like "john bee".
            ("a", &["EY"]),
            ("b", &["B", "IY"]),
            ("c", &["S", "IY"]),
            ("d", &["D", "IY"]),
            ("e", &["IY"]),
            ("j", &["JH", "EY"]),
            ("k", &["K", "EY"]),
            // Common test vocabulary.
            ("andrew", &["AE", "N", "D", "R", "UW"]),
            ("andru", &["AE", "N", "D", "R", "UW"]),
            ("bat", &["B", "AE", "T"]),
            ("bee", &["B", "IY"]),
            ("brown", &["B", "R", "AW", "N"]),
            ("cat", &["K", "AE", "T"]),
            ("dog", &["D", "AO", "G"]),
            ("jen", &["JH", "EH", "N"]),
            ("jennifer", &["JH", "EH", "N", "AH", "F", "ER"]),
            ("john", &["JH", "AA", "N"]),
            ("jon", &["JH", "AA", "N"]),
            ("kitten", &["K", "IH", "T", "AH", "N"]),
            ("mitten", &["M", "IH", "T", "AH", "N"]),
            ("rat", &["R", "AE", "T"]),
            ("see", &["S", "IY"]),
            ("sitting", &["S", "IH", "T", "IH", "NG"]),
            ("smith", &["S", "M", "IH", "TH"]),
            ("smyth", &["S", "M", "IH", "TH"]),
        ];
        for (word, phonemes) in entries {
            words.insert(word, phonemes.to_vec());
        }
        Self {
            words: Arc::new(words),
        }
    }

    fn word_tokens(&self, word: &str) -> Vec<&'static str> {
        if let Some(tokens) = self.words.get(word) {
            return tokens.clone();
        }
        // Letter-to-sound fallback: one phoneme per letter.
        word.chars()
            .filter_map(|c| match c.to_ascii_lowercase() {
                'a' => Some("AE"),
                'b' => Some("B"),
                'c' | 'k' | 'q' => Some("K"),
                'd' => Some("D"),
                'e' => Some("EH"),
                'f' => Some("F"),
                'g' => Some("G"),
                'h' => Some("HH"),
                'i' => Some("IH"),
                'j' => Some("JH"),
                'l' => Some("L"),
                'm' => Some("M"),
                'n' => Some("N"),
                'o' => Some("AA"),
                'p' => Some("P"),
                'r' => Some("R"),
                's' => Some("S"),
                't' => Some("T"),
                'u' => Some("AH"),
                'v' => Some("V"),
                'w' => Some("W"),
                'x' => Some("Z"),
                'y' => Some("Y"),
                'z' => Some("Z"),
                _ => None,
            })
            .collect()
    }
}

impl Pronouncer for LexiconPronouncer {
    fn pronounce(&self, phrase: &str) -> Result<Pronunciation> {
        let mut tokens = Vec::new();
        for word in phrase.to_lowercase().split_whitespace() {
            tokens.extend(self.word_tokens(word));
        }
        Pronunciation::from_arpabet(tokens)
    }
}
