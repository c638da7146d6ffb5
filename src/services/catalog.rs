use crate::{
    error::{ApiError, Result},
    models::PerfumeSearchResult,
    store::PerfumeStore,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const MIN_QUERY_CHARS: usize = 2;
pub const SEARCH_LIMIT: usize = 8;

/// Autocomplete lookups and search bookkeeping over the perfume catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn PerfumeStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn PerfumeStore>) -> Self {
        Self { store }
    }

    /// Up to [`SEARCH_LIMIT`] perfumes by name, brand or exact note.
    /// Queries shorter than [`MIN_QUERY_CHARS`] return nothing.
    pub async fn search_perfumes(&self, query: &str) -> Result<Vec<PerfumeSearchResult>> {
        let q = query.trim();
        if q.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let results = self.store.search(q, SEARCH_LIMIT).await?;
        debug!("Autocomplete '{}' returned {} perfumes", q, results.len());
        Ok(results)
    }

    /// Counts one search hit against a perfume.
    pub async fn record_search(&self, perfume_id: &str) -> Result<()> {
        let id = perfume_id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidInput("Perfume id cannot be empty".to_string()));
        }

        if self.store.increment_search_count(id).await? {
            Ok(())
        } else {
            warn!("Search hit for unknown perfume {}", id);
            Err(ApiError::NotFound(format!("Perfume {} not found", id)))
        }
    }
}
