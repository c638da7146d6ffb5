use crate::services::dictionaries::{self, ACCORD_KEYWORDS, GENDER_PHRASES, VIBE_ACCORDS};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// Tokens shorter than this are never used as search terms.
pub const MIN_TERM_LEN: usize = 4;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// Everything the assistant pulls out of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub accords: BTreeSet<String>,
    pub gender: Option<&'static str>,
    pub terms: Vec<String>,
    pub vibes: Vec<String>,
}

impl Extraction {
    pub fn from_message(message: &str) -> Self {
        Self {
            accords: extract_accords(message),
            gender: extract_gender(message),
            terms: extract_search_terms(message),
            vibes: extract_vibes(message),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.accords.is_empty() && self.gender.is_none() && self.terms.is_empty()
    }
}

/// Accords named directly by a keyword plus those implied by any vibe phrase.
///
/// Matching is plain substring matching on the lower-cased message, so short
/// keywords can fire inside longer words ("hot" in "photo").
pub fn extract_accords(message: &str) -> BTreeSet<String> {
    let msg = message.to_lowercase();
    let mut accords = BTreeSet::new();

    for (accord, keywords) in ACCORD_KEYWORDS {
        if keywords.iter().any(|keyword| msg.contains(keyword)) {
            accords.insert(accord.to_string());
        }
    }

    for (vibe, implied) in VIBE_ACCORDS {
        if msg.contains(vibe) {
            accords.extend(implied.iter().map(|accord| accord.to_string()));
        }
    }

    accords
}

/// Vibe phrases present in the message, in table order.
pub fn extract_vibes(message: &str) -> Vec<String> {
    let msg = message.to_lowercase();
    VIBE_ACCORDS
        .iter()
        .filter(|(vibe, _)| msg.contains(vibe))
        .map(|(vibe, _)| vibe.to_string())
        .collect()
}

/// First gender phrase found, walking the phrase table in order.
pub fn extract_gender(message: &str) -> Option<&'static str> {
    let msg = format!(" {} ", message.to_lowercase());
    GENDER_PHRASES
        .iter()
        .find(|(phrase, _)| msg.contains(phrase))
        .map(|(_, label)| *label)
}

/// Significant words of the message: alphanumeric runs of at least
/// [`MIN_TERM_LEN`] characters that are not stop words. Order is kept and
/// repeats are dropped.
pub fn extract_search_terms(message: &str) -> Vec<String> {
    let msg = message.to_lowercase();
    let cleaned = NON_ALPHANUMERIC.replace_all(&msg, " ");

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TERM_LEN)
        .filter(|token| !dictionaries::is_stop_word(token))
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}
