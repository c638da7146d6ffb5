//! Persistence seam for perfume lookups.
//!
//! The schema is owned by the web app's migration tooling; stores only read
//! the perfume table and bump its search counter.

use crate::{
    error::Result,
    models::{PerfumeSearchResult, PerfumeSummary},
    services::query_builder::PerfumeQuery,
};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryPerfumeStore;
pub use postgres::PgPerfumeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first; records without a year sort last.
    ReleaseYearDesc,
    /// Lower-cased name, then the raw name. Both stores sort on this key, so
    /// "amber" comes before "Zeta" whatever the database collation.
    NameAsc,
}

#[async_trait]
pub trait PerfumeStore: Send + Sync {
    /// Records matching `filter` (all records when `None`), sorted by `order`
    /// and truncated to `limit`.
    async fn find_many(
        &self,
        filter: Option<&PerfumeQuery>,
        order: &[SortKey],
        limit: usize,
    ) -> Result<Vec<PerfumeSummary>>;

    /// Autocomplete lookup: name or brand contains `query`, or any note
    /// equals it. Sorted by name.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PerfumeSearchResult>>;

    /// Returns false when no perfume has this id.
    async fn increment_search_count(&self, id: &str) -> Result<bool>;
}
