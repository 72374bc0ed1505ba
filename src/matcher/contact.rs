//! A fuzzy matcher with domain knowledge about contact lists.

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::matcher::{EnHybridFuzzyMatcher, Match};
use crate::nlp::{EnPreProcessor, PreProcessor, Tokenizer, WhitespaceTokenizer};
use crate::pronouncer::Pronouncer;

/// Fields made available from the user-defined contact object for
/// pronunciation and distance functions.
#[derive(Debug, Clone, Default)]
pub struct ContactFields {
    /// The name of the contact.
    pub name: Option<String>,
    /// The aliases the contact also goes by.
    pub aliases: Vec<String>,
}

/// Configuration to tweak the accuracy of the contact matcher.
#[derive(Debug, Clone, Copy)]
pub struct ContactMatcherConfig {
    /// Between 0 and 1; trade-off between the phonetic and the lexical
    /// distance scores. 1 meaning 100% phonetic score, 0% lexical score.
    pub phonetic_weight_percentage: f64,
    /// The maximum number of contacts the matcher can return.
    pub max_returns: usize,
    /// The maximum (normalized) distance to a match: 0 for exact match,
    /// around 1 when nothing matches. Can be above 1 when lengths differ.
    pub find_threshold: f64,
    /// Candidate cutoff, together with `best_distance_multiplier`:
    /// `max(best_distance * best_distance_multiplier, max_distance_margin_returns)`.
    pub max_distance_margin_returns: f64,
    /// See `max_distance_margin_returns`.
    pub best_distance_multiplier: f64,
}

impl Default for ContactMatcherConfig {
    fn default() -> Self {
        Self {
            phonetic_weight_percentage: 0.7,
            max_returns: 4,
            find_threshold: 0.35,
            max_distance_margin_returns: 0.02,
            best_distance_multiplier: 1.1,
        }
    }
}

/// One indexed search phrase: a window over a contact's name or alias,
/// referring back to the contact by position.
struct Variation {
    contact: usize,
    phrase: String,
}

/// A fuzzy matcher that uses domain knowledge about contacts and sets up a
/// simpler API.
///
/// Names are pre-processed and indexed under several variations (token
/// windows anchored at the beginning and at the end of the name) so
/// partial queries like a first or last name alone still land on the
/// right contact. Aliases are indexed as given.
pub struct EnContactMatcher<C, P> {
    contacts: Vec<C>,
    name_matcher: EnHybridFuzzyMatcher<Variation, P>,
    alias_matcher: EnHybridFuzzyMatcher<Variation, P>,
    name_max_window_size: usize,
    alias_max_window_size: usize,
    preprocessor: EnPreProcessor,
    config: ContactMatcherConfig,
}

impl<C, P: Pronouncer + Clone> EnContactMatcher<C, P> {
    /// Create a contact matcher with the default configuration.
    pub fn new<F>(contacts: Vec<C>, extract_fields: F, pronouncer: P) -> Result<Self>
    where
        F: Fn(&C) -> ContactFields,
    {
        Self::with_config(
            contacts,
            extract_fields,
            pronouncer,
            ContactMatcherConfig::default(),
        )
    }

    /// Create a contact matcher.
    ///
    /// `extract_fields` maps each contact to the name and aliases it can
    /// be found by. The pronouncer is cloned into the two underlying
    /// hybrid matchers, so it should be cheap to clone (or wrapped in a
    /// shared handle).
    pub fn with_config<F>(
        contacts: Vec<C>,
        extract_fields: F,
        pronouncer: P,
        config: ContactMatcherConfig,
    ) -> Result<Self>
    where
        F: Fn(&C) -> ContactFields,
    {
        let tokenizer = WhitespaceTokenizer::new();
        let preprocessor = EnPreProcessor::new();

        let mut name_targets = Vec::new();
        let mut alias_targets = Vec::new();
        let mut name_max_window_size = 1;
        let mut alias_max_window_size = 1;

        for (index, contact) in contacts.iter().enumerate() {
            let fields = extract_fields(contact);

            if let Some(name) = fields.name {
                let name = preprocessor.pre_process(&name);
                let variations = name_variations(&tokenizer, index, &name);
                name_max_window_size = name_max_window_size.max(variations.len());
                name_targets.extend(variations);
            }
            for alias in &fields.aliases {
                // Aliases are not pre-processed, respecting what was passed in.
                let variations = name_variations(&tokenizer, index, alias);
                alias_max_window_size = alias_max_window_size.max(variations.len());
                alias_targets.extend(variations);
            }
        }

        let extract = |variation: &Variation| variation.phrase.clone();
        let name_matcher = EnHybridFuzzyMatcher::new(
            name_targets,
            config.phonetic_weight_percentage,
            extract,
            pronouncer.clone(),
        )?;
        let alias_matcher = EnHybridFuzzyMatcher::new(
            alias_targets,
            config.phonetic_weight_percentage,
            extract,
            pronouncer,
        )?;

        Ok(Self {
            contacts,
            name_matcher,
            alias_matcher,
            name_max_window_size,
            alias_max_window_size,
            preprocessor,
            config,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ContactMatcherConfig {
        &self.config
    }

    /// Find a contact by name or alias.
    pub fn find(&self, query: &str) -> Result<Vec<&C>> {
        let target = self.preprocessor.pre_process(query);
        let name_window = self.name_max_window_size * self.config.max_returns;
        let alias_window = self.alias_max_window_size * self.config.max_returns;

        let names =
            self.name_matcher
                .find_k_nearest_within(&target, name_window, self.config.find_threshold)?;
        let aliases = self.alias_matcher.find_k_nearest_within(
            &target,
            alias_window,
            self.config.find_threshold,
        )?;

        let candidates = merge(names, aliases);
        Ok(self.select_matches(candidates))
    }

    /// Find a contact by only searching over names.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<&C>> {
        let query = self.preprocessor.pre_process(name);
        let name_window = self.name_max_window_size * self.config.max_returns;
        let candidates =
            self.name_matcher
                .find_k_nearest_within(&query, name_window, self.config.find_threshold)?;
        Ok(self.select_matches(candidates))
    }

    /// Find a contact by only searching over aliases.
    pub fn find_by_alias(&self, alias: &str) -> Result<Vec<&C>> {
        let query = self.preprocessor.pre_process(alias);
        let alias_window = self.alias_max_window_size * self.config.max_returns;
        let candidates = self.alias_matcher.find_k_nearest_within(
            &query,
            alias_window,
            self.config.find_threshold,
        )?;
        Ok(self.select_matches(candidates))
    }

    /// Cut candidates off at a margin around the best distance, dedupe by
    /// contact, and cap at `max_returns`.
    fn select_matches<'a>(&'a self, candidates: Vec<Match<'a, Variation>>) -> Vec<&'a C> {
        let best_distance = match candidates.first() {
            Some(best) => best.distance(),
            None => return Vec::new(),
        };
        let max_distance = (best_distance * self.config.best_distance_multiplier)
            .max(self.config.max_distance_margin_returns);

        let mut seen = FxHashSet::default();
        let mut matches = Vec::new();
        for candidate in candidates {
            if matches.len() == self.config.max_returns {
                break;
            }
            if candidate.distance() < max_distance
                && seen.insert(candidate.element().contact)
            {
                matches.push(&self.contacts[candidate.element().contact]);
            }
        }
        matches
    }
}

/// Sliding windows over the name's tokens, anchored at the beginning and
/// at the end: `"ann mary smith"` yields `"ann"`, `"mary smith"`,
/// `"ann mary"`, `"smith"`, and the full name.
fn name_variations(tokenizer: &WhitespaceTokenizer, contact: usize, name: &str) -> Vec<Variation> {
    let tokens = tokenizer.tokenize(name);
    let mut variations = Vec::with_capacity(2 * tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        variations.push(Variation {
            contact,
            phrase: name[..token.interval.last].to_string(),
        });
        if let Some(next) = tokens.get(i + 1) {
            variations.push(Variation {
                contact,
                phrase: name[next.interval.first..].to_string(),
            });
        }
    }
    variations
}

/// Merge two distance-sorted candidate lists, preserving order.
fn merge<'a>(
    a: Vec<Match<'a, Variation>>,
    b: Vec<Match<'a, Variation>>,
) -> Vec<Match<'a, Variation>> {
    let mut candidates = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();

    while let (Some(x), Some(y)) = (a.peek(), b.peek()) {
        if x.distance() < y.distance() {
            candidates.extend(a.next());
        } else {
            candidates.extend(b.next());
        }
    }
    candidates.extend(a);
    candidates.extend(b);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_variations_windows() {
        let tokenizer = WhitespaceTokenizer::new();
        let variations = name_variations(&tokenizer, 0, "ann mary smith");
        let phrases: Vec<&str> = variations.iter().map(|v| v.phrase.as_str()).collect();
        assert_eq!(
            phrases,
            vec!["ann", "mary smith", "ann mary", "smith", "ann mary smith"]
        );
    }

    #[test]
    fn test_single_token_variation() {
        let tokenizer = WhitespaceTokenizer::new();
        let variations = name_variations(&tokenizer, 3, "jennifer");
        assert_eq!(variations.len(), 1);
        assert_eq!(variations[0].phrase, "jennifer");
        assert_eq!(variations[0].contact, 3);
    }

    #[test]
    fn test_empty_name_has_no_variations() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(name_variations(&tokenizer, 0, "").is_empty());
    }
}
