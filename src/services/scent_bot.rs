use crate::{
    error::Result,
    models::BotResponse,
    services::{
        extractors::Extraction,
        query_builder::build_query,
        response_composer::{compose_text, FALLBACK_MESSAGE},
    },
    store::{PerfumeStore, SortKey},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Number of perfumes returned with every answer.
pub const RESULT_LIMIT: usize = 3;

pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 1000;

/// Keyword-driven fragrance assistant.
///
/// One pass per message: extract accords, gender, vibes and terms; build a
/// filter; look up at most [`RESULT_LIMIT`] perfumes; describe them. Results
/// are filtered and sorted by name, never scored.
#[derive(Clone)]
pub struct ScentBot {
    store: Arc<dyn PerfumeStore>,
    max_message_chars: usize,
}

impl ScentBot {
    pub fn new(store: Arc<dyn PerfumeStore>) -> Self {
        Self {
            store,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }

    pub fn with_max_message_chars(mut self, max_message_chars: usize) -> Self {
        self.max_message_chars = max_message_chars;
        self
    }

    /// Answers one chat message. Any text is valid input; only store
    /// failures are returned as errors.
    pub async fn answer(&self, message: &str) -> Result<BotResponse> {
        let message = truncate_chars(message, self.max_message_chars);
        let extraction = Extraction::from_message(message);

        debug!(
            accords = ?extraction.accords,
            gender = ?extraction.gender,
            vibes = ?extraction.vibes,
            terms = ?extraction.terms,
            "Extracted scent request"
        );

        let Some(query) = build_query(&extraction.accords, extraction.gender, &extraction.terms)
        else {
            let perfumes = self
                .store
                .find_many(None, &[SortKey::ReleaseYearDesc, SortKey::NameAsc], RESULT_LIMIT)
                .await?;

            info!(
                results = perfumes.len(),
                "No usable keywords, answering with recent releases"
            );

            return Ok(BotResponse {
                text: FALLBACK_MESSAGE.to_string(),
                perfumes,
            });
        };

        let perfumes = self
            .store
            .find_many(Some(&query), &[SortKey::NameAsc], RESULT_LIMIT)
            .await?;

        info!(
            clauses = query.any_of.len(),
            gender = ?query.gender,
            results = perfumes.len(),
            "Answered scent request"
        );

        let text = compose_text(
            perfumes.len(),
            &extraction.accords,
            extraction.gender,
            &extraction.vibes,
        );

        Ok(BotResponse { text, perfumes })
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ApiError,
        models::{PerfumeRecord, PerfumeSearchResult, PerfumeSummary},
        services::{query_builder::PerfumeQuery, response_composer::NO_MATCH_MESSAGE},
        store::MemoryPerfumeStore,
    };
    use async_trait::async_trait;

    fn record(
        id: &str,
        name: &str,
        year: i32,
        gender: &str,
        accords: &[&str],
        description: &str,
    ) -> PerfumeRecord {
        PerfumeRecord {
            id: id.to_string(),
            name: name.to_string(),
            brand: "Maison Test".to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            image_url: None,
            gender: Some(gender.to_string()),
            description: Some(description.to_string()),
            accords: accords.iter().map(|a| a.to_string()).collect(),
            top_notes: Vec::new(),
            heart_notes: Vec::new(),
            base_notes: Vec::new(),
            release_year: Some(year),
            search_count: 0,
        }
    }

    fn bot() -> ScentBot {
        let store = MemoryPerfumeStore::new(vec![
            record("1", "Velvet Night", 2019, "for women", &["vanilla", "oriental"], "Warm and deep"),
            record("2", "Cedar Walk", 2021, "for men", &["woody", "green"], "A walk in the woods"),
            record("3", "Lemon Drop", 2022, "for women", &["citrus", "fresh"], "Zesty morning"),
            record("4", "Blue Tide", 2022, "for women and men", &["aquatic", "fresh"], "Sea spray"),
            record("5", "Amber Veil", 2018, "for women and men", &["oriental", "musky"], "Resinous"),
        ]);
        ScentBot::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_woody_date_night() {
        let response = bot()
            .answer("I want a woody fragrance for a date night")
            .await
            .unwrap();

        assert!(response.perfumes.len() <= RESULT_LIMIT);
        assert!(!response.perfumes.is_empty());
        assert!(response.text.contains("musky") || response.text.contains("floral"));
        let names: Vec<_> = response.perfumes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amber Veil", "Cedar Walk", "Velvet Night"]);
    }

    #[tokio::test]
    async fn test_gender_restricts_results() {
        let response = bot()
            .answer("something for women, citrus and fresh")
            .await
            .unwrap();

        let names: Vec<_> = response.perfumes.iter().map(|p| p.name.as_str()).collect();
        // Blue Tide matches "women" inside "for women and men".
        assert_eq!(names, vec!["Blue Tide", "Lemon Drop"]);
        assert!(response.text.starts_with("Based on your request for a women citrus, fresh scent"));
    }

    #[tokio::test]
    async fn test_empty_message_falls_back() {
        let response = bot().answer("").await.unwrap();
        assert_eq!(response.text, FALLBACK_MESSAGE);
        let names: Vec<_> = response.perfumes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Blue Tide", "Lemon Drop", "Cedar Walk"]);
    }

    #[tokio::test]
    async fn test_unknown_word_yields_no_match_text() {
        let response = bot().answer("xyzxyz").await.unwrap();
        assert!(response.perfumes.is_empty());
        assert_eq!(response.text, NO_MATCH_MESSAGE);
    }

    #[tokio::test]
    async fn test_answers_are_deterministic() {
        let bot = bot();
        let first = bot.answer("fresh summer scent").await.unwrap();
        let second = bot.answer("fresh summer scent").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_long_message_is_truncated() {
        let bot = bot().with_max_message_chars(10);
        // "woody" lies past the cap, so nothing usable remains.
        let message = format!("{}woody", "x".repeat(10));
        let capped = bot.answer(&message).await.unwrap();
        assert_eq!(capped.text, NO_MATCH_MESSAGE);
    }

    struct FailingStore;

    #[async_trait]
    impl PerfumeStore for FailingStore {
        async fn find_many(
            &self,
            _filter: Option<&PerfumeQuery>,
            _order: &[SortKey],
            _limit: usize,
        ) -> Result<Vec<PerfumeSummary>> {
            Err(ApiError::DatabaseError("connection refused".into()))
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<PerfumeSearchResult>> {
            Err(ApiError::DatabaseError("connection refused".into()))
        }

        async fn increment_search_count(&self, _id: &str) -> Result<bool> {
            Err(ApiError::DatabaseError("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let bot = ScentBot::new(Arc::new(FailingStore));
        assert!(matches!(
            bot.answer("woody").await,
            Err(ApiError::DatabaseError(_))
        ));
        assert!(bot.answer("").await.is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("éééé", 2), "éé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
