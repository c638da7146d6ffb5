//! Static keyword tables behind the scent assistant.
//!
//! All tables are ordered slices rather than maps: the extractors walk them
//! front to back, and for gender phrases the first hit wins, so table order is
//! part of the behaviour.

use crate::error::{ApiError, Result};
use lazy_static::lazy_static;
use std::collections::HashSet;

pub const FOR_MEN: &str = "for men";
pub const FOR_WOMEN: &str = "for women";
pub const FOR_WOMEN_AND_MEN: &str = "for women and men";

/// The three canonical gender labels, in the order they are reported.
pub const GENDER_LABELS: [&str; 3] = [FOR_MEN, FOR_WOMEN, FOR_WOMEN_AND_MEN];

/// Accord name followed by the words that imply it.
pub const ACCORD_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "woody",
        &["woody", "wood", "sandalwood", "cedar", "vetiver", "oud", "forest", "earthy"],
    ),
    (
        "floral",
        &["floral", "flower", "rose", "jasmine", "lily", "tuberose", "peony", "bouquet"],
    ),
    (
        "citrus",
        &["citrus", "lemon", "bergamot", "orange", "grapefruit", "lime", "mandarin", "zesty"],
    ),
    (
        "fresh",
        &["fresh", "clean", "crisp", "airy", "light", "soapy", "laundry"],
    ),
    (
        "aquatic",
        &["aquatic", "marine", "ocean", "sea breeze", "salty", "water", "aqua"],
    ),
    (
        "spicy",
        &["spicy", "spice", "pepper", "cinnamon", "cardamom", "clove", "saffron", "hot"],
    ),
    (
        "sweet",
        &["sweet", "gourmand", "caramel", "honey", "sugar", "candy", "praline", "chocolate"],
    ),
    ("vanilla", &["vanilla", "tonka", "creamy", "benzoin"]),
    ("musky", &["musk", "musky", "skin scent", "sensual", "intimate"]),
    (
        "oriental",
        &["oriental", "amber", "incense", "resin", "exotic", "warm", "opulent"],
    ),
    (
        "fruity",
        &["fruity", "fruit", "berry", "peach", "apple", "pear", "mango", "cherry"],
    ),
    (
        "green",
        &["green", "grass", "herbal", "leafy", "green tea", "matcha", "mint", "basil"],
    ),
    ("leather", &["leather", "suede", "tobacco", "smoky", "smoke"]),
    (
        "powdery",
        &["powdery", "powder", "iris", "violet", "makeup", "lipstick", "cosmetic"],
    ),
];

/// Mood, occasion and season phrases mapped to the accords they suggest.
pub const VIBE_ACCORDS: &[(&str, &[&str])] = &[
    ("date", &["musky", "floral", "oriental", "vanilla"]),
    ("night out", &["oriental", "spicy", "leather", "sweet"]),
    ("evening", &["oriental", "musky", "leather"]),
    ("romantic", &["floral", "musky", "vanilla"]),
    ("office", &["fresh", "citrus", "powdery", "green"]),
    ("casual", &["fresh", "citrus", "woody"]),
    ("gym", &["fresh", "aquatic", "citrus"]),
    ("club", &["sweet", "spicy", "oriental"]),
    ("wedding", &["floral", "powdery", "musky"]),
    ("beach", &["aquatic", "citrus", "fresh"]),
    ("rain", &["aquatic", "green", "woody"]),
    ("cozy", &["vanilla", "sweet", "woody"]),
    ("spring", &["floral", "green", "fresh"]),
    ("summer", &["citrus", "aquatic", "fresh", "fruity"]),
    ("autumn", &["woody", "spicy", "leather"]),
    ("winter", &["spicy", "oriental", "woody", "vanilla"]),
];

/// Phrase to canonical gender label. Unisex phrases come first so that
/// "for women and men" is not claimed by "for women"; women's phrases come
/// before men's because "woman" contains "man" and "female" contains "male".
/// The message is matched with a space on each side, so " men " also hits a
/// bare "men" at either end of it.
pub const GENDER_PHRASES: &[(&str, &str)] = &[
    ("unisex", FOR_WOMEN_AND_MEN),
    ("for women and men", FOR_WOMEN_AND_MEN),
    ("for men and women", FOR_WOMEN_AND_MEN),
    ("gender neutral", FOR_WOMEN_AND_MEN),
    ("genderless", FOR_WOMEN_AND_MEN),
    ("for anyone", FOR_WOMEN_AND_MEN),
    ("for both", FOR_WOMEN_AND_MEN),
    ("for women", FOR_WOMEN),
    ("women's", FOR_WOMEN),
    ("womens", FOR_WOMEN),
    ("women", FOR_WOMEN),
    ("woman", FOR_WOMEN),
    ("female", FOR_WOMEN),
    ("feminine", FOR_WOMEN),
    ("for her", FOR_WOMEN),
    ("girlfriend", FOR_WOMEN),
    ("wife", FOR_WOMEN),
    ("girl", FOR_WOMEN),
    ("lady", FOR_WOMEN),
    ("ladies", FOR_WOMEN),
    ("for men", FOR_MEN),
    ("men's", FOR_MEN),
    ("mens", FOR_MEN),
    (" men ", FOR_MEN),
    ("for a man", FOR_MEN),
    ("male", FOR_MEN),
    ("masculine", FOR_MEN),
    ("for him", FOR_MEN),
    ("boyfriend", FOR_MEN),
    ("husband", FOR_MEN),
    ("gentleman", FOR_MEN),
    ("guy", FOR_MEN),
    ("boy", FOR_MEN),
];

/// Words that carry no search signal in a fragrance request.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "these", "those", "from", "have",
    "your", "them", "they", "what", "which", "want", "need", "looking", "find",
    "give", "show", "something", "some", "anything", "please", "like", "love",
    "would", "could", "should", "good", "nice", "best", "great", "recommend",
    "suggest", "scent", "scents", "perfume", "perfumes", "fragrance", "fragrances",
    "cologne", "smell", "smells", "women", "woman", "mens", "womens", "unisex",
    "female", "male",
];

lazy_static! {
    pub static ref STOP_WORD_SET: HashSet<&'static str> = STOP_WORDS.iter().copied().collect();
}

pub fn accord_names() -> impl Iterator<Item = &'static str> {
    ACCORD_KEYWORDS.iter().map(|(accord, _)| *accord)
}

pub fn is_known_accord(name: &str) -> bool {
    accord_names().any(|accord| accord == name)
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Checks the tables against each other. Run once at startup.
pub fn validate() -> Result<()> {
    let mut seen = HashSet::new();
    for accord in accord_names() {
        if !seen.insert(accord) {
            return Err(ApiError::ConfigError(format!(
                "accord '{}' is defined more than once",
                accord
            )));
        }
    }

    for (vibe, accords) in VIBE_ACCORDS {
        if let Some(unknown) = accords.iter().find(|a| !is_known_accord(a)) {
            return Err(ApiError::ConfigError(format!(
                "vibe '{}' references unknown accord '{}'",
                vibe, unknown
            )));
        }
    }

    for (phrase, label) in GENDER_PHRASES {
        if !GENDER_LABELS.contains(label) {
            return Err(ApiError::ConfigError(format!(
                "gender phrase '{}' maps to unknown label '{}'",
                phrase, label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_consistent() {
        assert!(validate().is_ok());
    }

    #[test]
    fn test_fourteen_accords() {
        assert_eq!(accord_names().count(), 14);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let all_keywords = ACCORD_KEYWORDS.iter().flat_map(|(_, words)| words.iter());
        let all_phrases = GENDER_PHRASES.iter().map(|(phrase, _)| phrase);
        for word in all_keywords.chain(all_phrases) {
            assert_eq!(*word, word.to_lowercase());
        }
    }

    #[test]
    fn test_unisex_phrase_precedes_women_phrase() {
        let position = |p: &str| GENDER_PHRASES.iter().position(|(phrase, _)| *phrase == p);
        assert!(position("for women and men") < position("for women"));
        assert!(position("woman") < position("for men"));
        assert!(position("female") < position("male"));
        assert!(position("women") < position(" men "));
    }
}
