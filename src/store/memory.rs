use crate::{
    error::{ApiError, Result},
    models::{PerfumeRecord, PerfumeSearchResult, PerfumeSummary},
    services::query_builder::{contains_ignore_case, PerfumeQuery},
    store::{PerfumeStore, SortKey},
};
use async_trait::async_trait;
use std::{cmp::Ordering, path::Path, sync::RwLock};
use tracing::info;

/// Perfume store held in process memory. Evaluates the same predicate the
/// Postgres store compiles to SQL.
#[derive(Debug, Default)]
pub struct MemoryPerfumeStore {
    records: RwLock<Vec<PerfumeRecord>>,
}

impl MemoryPerfumeStore {
    pub fn new(records: Vec<PerfumeRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Loads a JSON array of perfume records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<PerfumeRecord> = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} perfumes from {}",
            records.len(),
            path.display()
        );
        Ok(Self::new(records))
    }

    pub fn search_count(&self, id: &str) -> Option<i64> {
        let records = self.records.read().ok()?;
        records.iter().find(|r| r.id == id).map(|r| r.search_count)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<PerfumeRecord>>> {
        self.records
            .read()
            .map_err(|_| ApiError::InternalError("perfume store lock poisoned".to_string()))
    }
}

fn matches(record: &PerfumeRecord, query: &PerfumeQuery) -> bool {
    let any = query.any_of.iter().any(|clause| {
        clause.matches(
            &record.name,
            &record.brand,
            record.description.as_deref(),
            &record.accords,
        )
    });

    let gender_ok = match &query.gender {
        Some(needle) => record
            .gender
            .as_deref()
            .is_some_and(|g| contains_ignore_case(g, needle)),
        None => true,
    };

    any && gender_ok
}

/// Case-insensitive name order, raw name as the tie-break.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare(a: &PerfumeRecord, b: &PerfumeRecord, order: &[SortKey]) -> Ordering {
    order
        .iter()
        .map(|key| match key {
            SortKey::ReleaseYearDesc => match (a.release_year, b.release_year) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::NameAsc => compare_names(&a.name, &b.name),
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[async_trait]
impl PerfumeStore for MemoryPerfumeStore {
    async fn find_many(
        &self,
        filter: Option<&PerfumeQuery>,
        order: &[SortKey],
        limit: usize,
    ) -> Result<Vec<PerfumeSummary>> {
        let records = self.read()?;
        let mut hits: Vec<&PerfumeRecord> = records
            .iter()
            .filter(|record| filter.map_or(true, |query| matches(record, query)))
            .collect();

        hits.sort_by(|a, b| compare(a, b, order));

        Ok(hits
            .into_iter()
            .take(limit)
            .map(PerfumeRecord::summary)
            .collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PerfumeSearchResult>> {
        let records = self.read()?;
        let mut hits: Vec<&PerfumeRecord> = records
            .iter()
            .filter(|record| {
                contains_ignore_case(&record.name, query)
                    || contains_ignore_case(&record.brand, query)
                    || record
                        .top_notes
                        .iter()
                        .chain(&record.heart_notes)
                        .chain(&record.base_notes)
                        .any(|note| note == query)
            })
            .collect();

        hits.sort_by(|a, b| compare_names(&a.name, &b.name));

        Ok(hits
            .into_iter()
            .take(limit)
            .map(PerfumeRecord::search_result)
            .collect())
    }

    async fn increment_search_count(&self, id: &str) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ApiError::InternalError("perfume store lock poisoned".to_string()))?;

        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.search_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
