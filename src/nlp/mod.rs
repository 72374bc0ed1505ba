//! Text preparation: tokenizers and pre-processors.
//!
//! Higher-level matchers normalize raw user text before pronouncing or
//! indexing it. Tokenizers split a string while remembering where each
//! token came from; pre-processors transform a string before any
//! classification or understanding is known about it.

mod preprocessor;
mod tokenizer;

pub use preprocessor::{
    CaseFoldingPreProcessor, ChainedRuleBasedPreProcessor, EnPreProcessor, PreProcessor,
    UnicodePreProcessor, WhiteSpacePreProcessor,
};
pub use tokenizer::{Interval, SplittingTokenizer, Token, Tokenizer, WhitespaceTokenizer};
