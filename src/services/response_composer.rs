use crate::services::{dictionaries::FOR_WOMEN_AND_MEN, query_builder::gender_needle};
use std::collections::BTreeSet;

pub const NO_MATCH_MESSAGE: &str = "I couldn't find an exact match for that. Try rephrasing with a mood, a season or a favourite note, like \"a fresh citrus scent for summer\".";

pub const FALLBACK_MESSAGE: &str = "I couldn't pick out any notes or vibes there, so here are some popular recent releases to start with.";

const MAX_VIBES: usize = 2;
const MAX_ACCORDS: usize = 3;

/// Builds the sentence that introduces the matched perfumes.
pub fn compose_text(
    match_count: usize,
    accords: &BTreeSet<String>,
    gender: Option<&str>,
    vibes: &[String],
) -> String {
    if match_count == 0 {
        return NO_MATCH_MESSAGE.to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    if let Some(label) = gender {
        if label == FOR_WOMEN_AND_MEN {
            parts.push("a unisex".to_string());
        } else {
            parts.push(format!("a {}", gender_needle(label)));
        }
    }

    if !vibes.is_empty() {
        let picked: Vec<&str> = vibes.iter().take(MAX_VIBES).map(String::as_str).collect();
        parts.push(format!("{}-inspired", picked.join(" & ")));
    }

    if !accords.is_empty() {
        let picked: Vec<&str> = accords.iter().take(MAX_ACCORDS).map(String::as_str).collect();
        parts.push(format!("{} scent", picked.join(", ")));
    }

    let descriptor = if parts.is_empty() {
        "fragrance".to_string()
    } else {
        parts.join(" ")
    };

    let subject = if match_count == 1 {
        "this".to_string()
    } else {
        format!("these {}", match_count)
    };

    format!(
        "Based on your request for {}, you might enjoy {}:",
        descriptor, subject
    )
}
