//! Tokenizers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Byte-offset bounds of a token within its source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Starting index (inclusive).
    pub first: usize,
    /// Ending index (exclusive).
    pub last: usize,
}

impl Interval {
    /// Create an interval.
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// The length of the token.
    pub fn len(&self) -> usize {
        self.last - self.first
    }

    /// Whether the interval is empty.
    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }
}

/// A substring token of the original string with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The substring.
    pub value: String,
    /// The interval location within the source.
    pub interval: Interval,
}

/// Splits strings into tokens.
pub trait Tokenizer {
    /// Tokenize a string.
    fn tokenize(&self, query: &str) -> Vec<Token>;
}

/// Tokenizer that emits the spans between matches of a separator pattern.
///
/// Separator matches are discarded; empty spans are not emitted.
#[derive(Debug, Clone)]
pub struct SplittingTokenizer {
    pattern: Regex,
}

impl SplittingTokenizer {
    /// Create a tokenizer splitting on `pattern`.
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Tokenizer for SplittingTokenizer {
    fn tokenize(&self, query: &str) -> Vec<Token> {
        let mut result = Vec::new();
        let mut boundary = 0;

        for separator in self.pattern.find_iter(query) {
            if boundary < separator.start() {
                let interval = Interval::new(boundary, separator.start());
                result.push(Token {
                    value: query[interval.first..interval.last].to_string(),
                    interval,
                });
            }
            boundary = separator.end();
        }

        if boundary < query.len() {
            let interval = Interval::new(boundary, query.len());
            result.push(Token {
                value: query[interval.first..interval.last].to_string(),
                interval,
            });
        }
        result
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Tokenizer that splits on whitespace.
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer {
    inner: SplittingTokenizer,
}

impl WhitespaceTokenizer {
    /// Create a whitespace tokenizer.
    pub fn new() -> Self {
        Self {
            inner: SplittingTokenizer::new(WHITESPACE.clone()),
        }
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, query: &str) -> Vec<Token> {
        self.inner.tokenize(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenize() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens = tokenizer.tokenize("the quick  brown");
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["the", "quick", "brown"]);
    }

    #[test]
    fn test_intervals_index_source() {
        let tokenizer = WhitespaceTokenizer::new();
        let source = "  leading and trailing  ";
        for token in tokenizer.tokenize(source) {
            assert_eq!(&source[token.interval.first..token.interval.last], token.value);
            assert!(!token.interval.is_empty());
        }
    }

    #[test]
    fn test_empty_and_blank_strings() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
    }

    #[test]
    fn test_single_token() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens = tokenizer.tokenize("word");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].interval, Interval::new(0, 4));
    }
}
