use serde::Serialize;
use std::collections::BTreeSet;

/// Only this many search terms become text clauses.
pub const MAX_QUERY_TERMS: usize = 4;

/// One alternative of the OR group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Clause {
    /// The record's accord list shares at least one entry with these.
    AccordsOverlap(Vec<String>),
    NameContains(String),
    BrandContains(String),
    DescriptionContains(String),
}

/// `(any of clauses) AND (gender contains needle)?`
///
/// Text comparisons are case-insensitive substring matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerfumeQuery {
    pub any_of: Vec<Clause>,
    pub gender: Option<String>,
}

impl Clause {
    pub fn matches(&self, name: &str, brand: &str, description: Option<&str>, accords: &[String]) -> bool {
        match self {
            Clause::AccordsOverlap(wanted) => accords.iter().any(|a| wanted.contains(a)),
            Clause::NameContains(term) => contains_ignore_case(name, term),
            Clause::BrandContains(term) => contains_ignore_case(brand, term),
            Clause::DescriptionContains(term) => {
                description.is_some_and(|text| contains_ignore_case(text, term))
            }
        }
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Strips the leading "for " from a canonical gender label.
pub fn gender_needle(label: &str) -> &str {
    label.strip_prefix("for ").unwrap_or(label)
}

/// Assembles the filter for one message. Returns `None` when there is
/// nothing to OR together, in which case the caller falls back to the
/// default listing; a gender alone never produces a query.
pub fn build_query(
    accords: &BTreeSet<String>,
    gender: Option<&str>,
    terms: &[String],
) -> Option<PerfumeQuery> {
    let mut any_of = Vec::new();

    if !accords.is_empty() {
        any_of.push(Clause::AccordsOverlap(accords.iter().cloned().collect()));
    }

    for term in terms.iter().take(MAX_QUERY_TERMS) {
        any_of.push(Clause::NameContains(term.clone()));
        any_of.push(Clause::BrandContains(term.clone()));
        any_of.push(Clause::DescriptionContains(term.clone()));
    }

    if any_of.is_empty() {
        return None;
    }

    Some(PerfumeQuery {
        any_of,
        gender: gender.map(|label| gender_needle(label).to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extractors::Extraction;

    fn query_for(message: &str) -> Option<PerfumeQuery> {
        let extraction = Extraction::from_message(message);
        build_query(&extraction.accords, extraction.gender, &extraction.terms)
    }

    #[test]
    fn test_no_query_for_empty_or_stop_words() {
        assert_eq!(query_for(""), None);
        assert_eq!(query_for("a the for me"), None);
    }

    #[test]
    fn test_gender_alone_is_not_a_query() {
        let accords = BTreeSet::new();
        assert_eq!(build_query(&accords, Some("for men"), &[]), None);
    }

    #[test]
    fn test_accords_and_gender() {
        let query = query_for("something for women, citrus and fresh").unwrap();
        assert_eq!(query.gender.as_deref(), Some("women"));
        assert_eq!(
            query.any_of[0],
            Clause::AccordsOverlap(vec!["citrus".to_string(), "fresh".to_string()])
        );
    }

    #[test]
    fn test_terms_are_capped() {
        let terms: Vec<String> = ["alpha", "bravo", "charlie", "delta", "echos"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let query = build_query(&BTreeSet::new(), None, &terms).unwrap();
        assert_eq!(query.any_of.len(), MAX_QUERY_TERMS * 3);
        assert!(!query.any_of.contains(&Clause::NameContains("echos".into())));
    }

    #[test]
    fn test_unmatched_word_still_builds_query() {
        let query = query_for("xyzxyz").unwrap();
        assert_eq!(
            query.any_of,
            vec![
                Clause::NameContains("xyzxyz".into()),
                Clause::BrandContains("xyzxyz".into()),
                Clause::DescriptionContains("xyzxyz".into()),
            ]
        );
        assert!(query.gender.is_none());
    }

    #[test]
    fn test_gender_needle() {
        assert_eq!(gender_needle("for women and men"), "women and men");
        assert_eq!(gender_needle("for men"), "men");
    }

    #[test]
    fn test_clause_matching() {
        let accords = vec!["woody".to_string()];
        assert!(Clause::AccordsOverlap(vec!["woody".into(), "citrus".into()])
            .matches("Terre", "Hermes", None, &accords));
        assert!(Clause::BrandContains("herm".into()).matches("Terre", "Hermes", None, &accords));
        assert!(!Clause::DescriptionContains("herm".into()).matches("Terre", "Hermes", None, &accords));
    }
}
