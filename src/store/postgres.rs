use crate::{
    error::Result,
    models::{PerfumeSearchResult, PerfumeSummary},
    services::query_builder::{Clause, PerfumeQuery},
    store::{PerfumeStore, SortKey},
};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Postgres, QueryBuilder,
};
use std::time::Duration;
use tracing::debug;

const PERFUME_TABLE: &str = "\"Perfume\"";
const SUMMARY_COLUMNS: &str = "id, name, brand, image_url, slug, gender, accords";

/// Perfume store backed by the web app's Postgres database.
#[derive(Debug, Clone)]
pub struct PgPerfumeStore {
    pool: PgPool,
}

impl PgPerfumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Appends the WHERE clause for `query`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &PerfumeQuery) {
    builder.push(" WHERE (");
    for (i, clause) in query.any_of.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        match clause {
            Clause::AccordsOverlap(accords) => {
                builder.push("accords && ");
                builder.push_bind(accords.clone());
                builder.push("::text[]");
            }
            Clause::NameContains(term) => {
                builder.push("name ILIKE ");
                builder.push_bind(like_pattern(term));
            }
            Clause::BrandContains(term) => {
                builder.push("brand ILIKE ");
                builder.push_bind(like_pattern(term));
            }
            Clause::DescriptionContains(term) => {
                builder.push("description ILIKE ");
                builder.push_bind(like_pattern(term));
            }
        }
    }
    builder.push(")");

    if let Some(gender) = &query.gender {
        builder.push(" AND gender ILIKE ");
        builder.push_bind(like_pattern(gender));
    }
}

fn order_by_sql(order: &[SortKey]) -> Option<String> {
    if order.is_empty() {
        return None;
    }
    let keys: Vec<&str> = order
        .iter()
        .map(|key| match key {
            SortKey::ReleaseYearDesc => "release_year DESC NULLS LAST",
            SortKey::NameAsc => "LOWER(name) ASC, name ASC",
        })
        .collect();
    Some(format!(" ORDER BY {}", keys.join(", ")))
}

#[async_trait]
impl PerfumeStore for PgPerfumeStore {
    async fn find_many(
        &self,
        filter: Option<&PerfumeQuery>,
        order: &[SortKey],
        limit: usize,
    ) -> Result<Vec<PerfumeSummary>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM {}", SUMMARY_COLUMNS, PERFUME_TABLE));

        if let Some(query) = filter {
            push_filter(&mut builder, query);
        }
        if let Some(order_by) = order_by_sql(order) {
            builder.push(order_by);
        }
        builder.push(" LIMIT ");
        builder.push_bind(limit as i64);

        debug!("perfume lookup: {}", builder.sql());

        let perfumes = builder
            .build_query_as::<PerfumeSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(perfumes)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PerfumeSearchResult>> {
        let sql = format!(
            "SELECT id, name, brand, image_url, slug FROM {} \
             WHERE name ILIKE $1 OR brand ILIKE $1 \
             OR $2 = ANY(top_notes) OR $2 = ANY(heart_notes) OR $2 = ANY(base_notes) \
             ORDER BY LOWER(name) ASC, name ASC LIMIT $3",
            PERFUME_TABLE
        );

        let results = sqlx::query_as::<_, PerfumeSearchResult>(&sql)
            .bind(like_pattern(query))
            .bind(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(results)
    }

    async fn increment_search_count(&self, id: &str) -> Result<bool> {
        let sql = format!(
            "UPDATE {} SET \"searchCount\" = \"searchCount\" + 1 WHERE id = $1",
            PERFUME_TABLE
        );

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
