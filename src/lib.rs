//! # phonmatch
//!
//! Fuzzy phonetic matching of short English phrases.
//!
//! Given a set of candidate phrases, this library finds those acoustically
//! and/or lexically nearest to a query under a configurable distance.
//! Phrases are parsed into bit-packed phone sequences (from IPA or
//! ARPAbet), embedded into a small pseudo-articulatory metric space
//! following:
//!
//! > Li, Ping, and Brian MacWhinney. "PatPho: A phonological pattern
//! > generator for neural networks." Behavior Research Methods,
//! > Instruments, & Computers 34.3 (2002): 408-415.
//!
//! and compared with a Wagner–Fischer edit distance. Nearest-neighbor
//! queries run against a vantage point tree, with a linear full-scan
//! matcher as the reference implementation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use phonmatch::prelude::*;
//!
//! let names = vec!["Andrew Smith", "Andrew", "John B", "John C"];
//! let matcher = EnHybridFuzzyMatcher::new(names, 0.7, |n: &&str| n.to_string(), pronouncer)?;
//!
//! for m in matcher.find_k_nearest_within("john bee", 2, 0.35)? {
//!     println!("{} ({})", m.element(), m.distance());
//! }
//! ```
//!
//! Queries are synchronous and read-only; a built matcher can be shared
//! freely across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod matcher;
pub mod nlp;
pub mod phone;
mod pronouncer;
pub mod pronunciation;
pub mod vptree;

pub use error::{Error, Result};
pub use pronouncer::Pronouncer;
pub use pronunciation::Pronunciation;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::distance::{
        string_distance, DistanceInput, EnHybridDistance, EnPhoneticDistance, Metric,
        StringDistance,
    };
    pub use crate::error::{Error, Result};
    pub use crate::matcher::{
        AcceleratedFuzzyMatcher, Backend, ContactFields, EnContactMatcher, EnHybridFuzzyMatcher,
        EnPhoneticFuzzyMatcher, LinearFuzzyMatcher, Match, StringFuzzyMatcher,
    };
    pub use crate::phone::{Phone, PhoneType};
    pub use crate::pronouncer::Pronouncer;
    pub use crate::pronunciation::Pronunciation;
    pub use crate::vptree::VpTree;
}
