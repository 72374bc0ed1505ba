//! Integration tests for matchers and façades.

mod common;

use common::LexiconPronouncer;
use phonmatch::distance::{string_distance, Metric};
use phonmatch::matcher::{
    AcceleratedFuzzyMatcher, Backend, ContactFields, ContactMatcherConfig, EnContactMatcher,
    EnHybridFuzzyMatcher, EnPhoneticFuzzyMatcher, LinearFuzzyMatcher, StringFuzzyMatcher,
};
use phonmatch::vptree::VpTree;
use phonmatch::Error;

const TARGET_STRINGS: [&str; 5] = ["Andrew Smith", "Andrew", "John B", "John C", "Jennifer"];

#[derive(Debug, Clone, PartialEq)]
struct TestContact {
    first_name: &'static str,
    last_name: &'static str,
}

fn contacts() -> Vec<TestContact> {
    vec![
        TestContact {
            first_name: "Andrew",
            last_name: "Smith",
        },
        TestContact {
            first_name: "Andrew",
            last_name: "",
        },
        TestContact {
            first_name: "John",
            last_name: "B",
        },
        TestContact {
            first_name: "John",
            last_name: "C",
        },
        TestContact {
            first_name: "Jennifer",
            last_name: "",
        },
    ]
}

/// Compares contacts by concatenated name, against either another contact
/// or a bare string query.
struct ContactDistance;

impl ContactDistance {
    fn full_name(contact: &TestContact) -> String {
        format!("{}{}", contact.first_name, contact.last_name)
    }
}

impl Metric<TestContact> for ContactDistance {
    fn distance(&self, a: &TestContact, b: &TestContact) -> f64 {
        string_distance(&Self::full_name(a), &Self::full_name(b)) as f64
    }
}

impl Metric<TestContact, String> for ContactDistance {
    fn distance(&self, a: &TestContact, b: &String) -> f64 {
        string_distance(&Self::full_name(a), b) as f64
    }
}

// ============================================================================
// Raw matchers with a user-supplied metric
// ============================================================================

#[test]
fn test_linear_matcher_with_closure_metric() {
    let metric = |a: &TestContact, b: &TestContact| {
        let a = format!("{}{}", a.first_name, a.last_name);
        let b = format!("{}{}", b.first_name, b.last_name);
        string_distance(&a, &b) as f64
    };
    let matcher = LinearFuzzyMatcher::new(contacts(), metric);
    assert_eq!(matcher.len(), 5);

    let query = TestContact {
        first_name: "Andru",
        last_name: "",
    };
    let nearest = matcher.find_nearest(&query).unwrap();
    assert_eq!(nearest.element().first_name, "Andrew");
    assert_eq!(nearest.element().last_name, "");
}

#[test]
fn test_accelerated_matcher_query_type_differs() {
    // Stored contacts, string queries: the metric bridges the two types.
    let matcher = AcceleratedFuzzyMatcher::new(contacts(), ContactDistance);
    let nearest = matcher.find_nearest(&"JohnB".to_string()).unwrap();
    assert_eq!(nearest.element().last_name, "B");
    assert_eq!(nearest.distance(), 0.0);
}

#[test]
fn test_user_metric_distances_are_raw() {
    let matcher = AcceleratedFuzzyMatcher::new(contacts(), ContactDistance);
    let matches = matcher
        .find_k_nearest_within(&"John".to_string(), 4, 1.0)
        .unwrap();
    // "JohnB" and "JohnC" are one deletion away; no normalization applies.
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.distance() == 1.0));
}

// ============================================================================
// VP-tree end-to-end scenarios
// ============================================================================

#[test]
fn test_vptree_k_nearest_scenario() {
    let metric = |a: &&str, b: &&str| string_distance(a, b) as f64;
    let tree = VpTree::new(["cat", "bat", "rat", "dog"], metric);

    let matches = tree.find_k_nearest(&"cat", 2);
    assert_eq!(matches.len(), 2);
    assert_eq!(*matches[0].element(), "cat");
    assert_eq!(matches[0].distance(), 0.0);
    // "bat" and "rat" tie at distance 1; one of them fills the second slot.
    assert_eq!(matches[1].distance(), 1.0);
    assert!(["bat", "rat"].contains(matches[1].element()));
}

#[test]
fn test_vptree_within_zero_scenario() {
    let metric = |a: &&str, b: &&str| string_distance(a, b) as f64;
    let tree = VpTree::new(["cat", "bat", "rat", "dog"], metric);

    let matches = tree.find_k_nearest_within(&"cat", 10, 0.0);
    assert_eq!(matches.len(), 1);
    assert_eq!(*matches[0].element(), "cat");
    assert_eq!(matches[0].distance(), 0.0);
}

// ============================================================================
// Normalizing façades
// ============================================================================

#[test]
fn test_string_facade_nearest() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    assert_eq!(matcher.len(), 5);
    assert!(!matcher.is_empty());

    // Case sensitive: "john B" is nearer to "John B" than to "John C".
    let nearest = matcher.find_nearest("john B").unwrap();
    assert_eq!(*nearest.element(), "John B");
}

#[test]
fn test_string_facade_nearest_within_empty_query() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    assert!(matcher.find_nearest_within("", 0.35).is_none());
}

#[test]
fn test_string_facade_limit_zero_exact() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    let nearest = matcher.find_nearest_within("John C", 0.0).unwrap();
    assert_eq!(*nearest.element(), "John C");
    assert_eq!(nearest.distance(), 0.0);
}

#[test]
fn test_string_facade_with_extractor() {
    let matcher = StringFuzzyMatcher::new(contacts(), |c: &TestContact| {
        format!("{} {}", c.first_name, c.last_name)
    });
    let nearest = matcher.find_nearest("john B").unwrap();
    assert_eq!(
        *nearest.element(),
        TestContact {
            first_name: "John",
            last_name: "B",
        }
    );
}

#[test]
fn test_string_facade_k_nearest_normalized_threshold() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    let query = "john";
    // distance("john", "John B") = 3 over 4 chars: 0.75 <= 0.8.
    let matches = matcher.find_k_nearest_within(query, 4, 0.8).unwrap();
    assert_eq!(matches.len(), 2);
    for m in &matches {
        assert!(m.element().starts_with("John"));
        assert!(m.distance() <= 0.8);
    }
}

#[test]
fn test_phonetic_facade() {
    let matcher = EnPhoneticFuzzyMatcher::new(
        TARGET_STRINGS,
        |s: &&str| s.to_string(),
        LexiconPronouncer::new(),
    )
    .unwrap();

    // "bee" sounds exactly like the letter B.
    let nearest = matcher.find_nearest("john bee").unwrap().unwrap();
    assert_eq!(*nearest.element(), "John B");
}

#[test]
fn test_hybrid_facade() {
    let matcher = EnHybridFuzzyMatcher::new(
        TARGET_STRINGS,
        0.7,
        |s: &&str| s.to_string(),
        LexiconPronouncer::new(),
    )
    .unwrap();
    assert_eq!(matcher.phonetic_weight_percentage(), 0.7);

    let nearest = matcher.find_nearest("john bee").unwrap().unwrap();
    assert_eq!(*nearest.element(), "John B");

    let nearest = matcher.find_nearest("andru").unwrap().unwrap();
    assert_eq!(*nearest.element(), "Andrew");
}

#[test]
fn test_hybrid_facade_invalid_weight() {
    let result = EnHybridFuzzyMatcher::new(
        TARGET_STRINGS,
        1.5,
        |s: &&str| s.to_string(),
        LexiconPronouncer::new(),
    );
    assert!(matches!(result, Err(Error::WeightOutOfRange(_))));
}

#[test]
fn test_facade_zero_k() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    assert_eq!(
        matcher.find_k_nearest("john", 0).unwrap_err(),
        Error::ZeroNeighbors
    );
}

#[test]
fn test_facade_negative_threshold() {
    let matcher = StringFuzzyMatcher::new(TARGET_STRINGS, |s: &&str| s.to_string());
    assert!(matcher.find_nearest_within("John C", -0.01).is_none());
}

#[test]
fn test_empty_facade() {
    let matcher = StringFuzzyMatcher::new(Vec::<String>::new(), |s: &String| s.clone());
    assert!(matcher.is_empty());
    assert!(matcher.find_nearest("anything").is_none());
    assert!(matcher.find_k_nearest("anything", 3).unwrap().is_empty());
}

// ============================================================================
// Linear and accelerated backends agree
// ============================================================================

#[test]
fn test_backends_agree() {
    let words: Vec<&str> = vec![
        "cat", "bat", "rat", "dog", "cot", "cart", "catch", "hat", "gnat", "coat", "kitten",
        "mitten", "sitting", "sitten", "smitten", "bitten",
    ];

    let linear =
        StringFuzzyMatcher::with_backend(words.clone(), |s: &&str| s.to_string(), Backend::Linear);
    let accelerated = StringFuzzyMatcher::with_backend(
        words.clone(),
        |s: &&str| s.to_string(),
        Backend::Accelerated,
    );

    for query in ["cat", "mitten", "zebra", "c", ""] {
        for k in [1, 3, 7, 32] {
            let a = linear.find_k_nearest(query, k).unwrap();
            let b = accelerated.find_k_nearest(query, k).unwrap();
            assert_eq!(a.len(), b.len(), "query {query:?} k {k}");

            // Distances agree exactly and are non-decreasing; tie-breaks may
            // order different elements.
            let da: Vec<f64> = a.iter().map(|m| m.distance()).collect();
            let db: Vec<f64> = b.iter().map(|m| m.distance()).collect();
            assert_eq!(da, db, "query {query:?} k {k}");
            assert!(da.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

// ============================================================================
// Contact matcher
// ============================================================================

fn contact_fields(contact: &TestContact) -> ContactFields {
    let name = if contact.last_name.is_empty() {
        contact.first_name.to_string()
    } else {
        format!("{} {}", contact.first_name, contact.last_name)
    };
    ContactFields {
        name: Some(name),
        aliases: Vec::new(),
    }
}

#[test]
fn test_contact_matcher_exact_name() {
    let matcher =
        EnContactMatcher::new(contacts(), contact_fields, LexiconPronouncer::new()).unwrap();

    let found = matcher.find("andrew smith").unwrap();
    assert!(!found.is_empty());
    assert_eq!(found[0].last_name, "Smith");
}

#[test]
fn test_contact_matcher_partial_name() {
    let matcher =
        EnContactMatcher::new(contacts(), contact_fields, LexiconPronouncer::new()).unwrap();

    // Last name alone matches through the end-anchored window.
    let found = matcher.find_by_name("smith").unwrap();
    assert!(found.iter().any(|c| c.last_name == "Smith"));
}

#[test]
fn test_contact_matcher_aliases() {
    let matcher = EnContactMatcher::new(
        contacts(),
        |contact: &TestContact| ContactFields {
            name: Some(contact.first_name.to_string()),
            aliases: if contact.last_name == "Smith" {
                vec!["smitty".to_string()]
            } else {
                Vec::new()
            },
        },
        LexiconPronouncer::new(),
    )
    .unwrap();

    let found = matcher.find_by_alias("smitty").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].last_name, "Smith");
}

#[test]
fn test_contact_matcher_caps_returns() {
    let many: Vec<TestContact> = (0..10)
        .map(|_| TestContact {
            first_name: "John",
            last_name: "",
        })
        .collect();
    let config = ContactMatcherConfig {
        max_returns: 2,
        ..ContactMatcherConfig::default()
    };
    let matcher =
        EnContactMatcher::with_config(many, contact_fields, LexiconPronouncer::new(), config)
            .unwrap();

    let found = matcher.find("john").unwrap();
    assert!(found.len() <= 2);
}

#[test]
fn test_contact_matcher_no_match_far_away() {
    let matcher =
        EnContactMatcher::new(contacts(), contact_fields, LexiconPronouncer::new()).unwrap();
    let found = matcher.find("xylophone quartet").unwrap();
    assert!(found.is_empty());
}
