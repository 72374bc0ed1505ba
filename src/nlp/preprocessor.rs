//! Pre-processors.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Transforms a string before any classification or understanding is known
/// about it.
pub trait PreProcessor {
    /// Perform the pre-processing.
    fn pre_process(&self, query: &str) -> String;
}

/// Normalizes to Unicode NFKC, so e.g. fullwidth and ligature forms
/// compare equal to their plain spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodePreProcessor;

impl PreProcessor for UnicodePreProcessor {
    fn pre_process(&self, query: &str) -> String {
        query.nfkc().collect()
    }
}

/// Lower-cases the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldingPreProcessor;

impl PreProcessor for CaseFoldingPreProcessor {
    fn pre_process(&self, query: &str) -> String {
        query.to_lowercase()
    }
}

/// Pre-processes by applying a list of rules sequentially. Rules added
/// first are applied first.
#[derive(Debug, Clone, Default)]
pub struct ChainedRuleBasedPreProcessor {
    rules: Vec<(Regex, String)>,
}

impl ChainedRuleBasedPreProcessor {
    /// Create an empty rule chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new rule: every match of `pattern` is replaced with
    /// `replacement`.
    pub fn add(&mut self, pattern: Regex, replacement: impl Into<String>) {
        self.rules.push((pattern, replacement.into()));
    }
}

impl PreProcessor for ChainedRuleBasedPreProcessor {
    fn pre_process(&self, query: &str) -> String {
        let mut result = query.to_string();
        for (pattern, replacement) in &self.rules {
            result = pattern.replace_all(&result, replacement.as_str()).into_owned();
        }
        result
    }
}

static EXTRA_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Trims the input and collapses whitespace runs to single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteSpacePreProcessor;

impl PreProcessor for WhiteSpacePreProcessor {
    fn pre_process(&self, query: &str) -> String {
        EXTRA_WHITESPACE.replace_all(query.trim(), " ").into_owned()
    }
}

/// Common English stop words dropped before matching.
const STOP_WORDS: &str = "a|an|at|by|el|i|in|la|las|los|my|of|on|san|santa|some|the|with|you";

static STOP_WORD_BEFORE_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({STOP_WORDS})\b ?")).expect("valid regex"));
static STOP_WORD_AFTER_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r" ?\b({STOP_WORDS})\b")).expect("valid regex"));
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}\p{S}]+").expect("valid regex"));

/// English pre-processor.
///
/// Chains Unicode NFKC normalization, case folding, stop-word removal,
/// punctuation/symbol clearing, and whitespace collapsing, in that order.
#[derive(Debug, Clone)]
pub struct EnPreProcessor {
    unicode: UnicodePreProcessor,
    case_fold: CaseFoldingPreProcessor,
    rules: ChainedRuleBasedPreProcessor,
    whitespace: WhiteSpacePreProcessor,
}

impl EnPreProcessor {
    /// Create an English pre-processor.
    pub fn new() -> Self {
        let mut rules = ChainedRuleBasedPreProcessor::new();
        rules.add(STOP_WORD_BEFORE_SPACE.clone(), "");
        rules.add(STOP_WORD_AFTER_SPACE.clone(), "");
        rules.add(PUNCTUATION.clone(), " ");
        Self {
            unicode: UnicodePreProcessor,
            case_fold: CaseFoldingPreProcessor,
            rules,
            whitespace: WhiteSpacePreProcessor,
        }
    }
}

impl Default for EnPreProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PreProcessor for EnPreProcessor {
    fn pre_process(&self, query: &str) -> String {
        let result = self.unicode.pre_process(query);
        let result = self.case_fold.pre_process(&result);
        let result = self.rules.pre_process(&result);
        self.whitespace.pre_process(&result)
    }
}
