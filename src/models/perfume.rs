use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Accepts either a JSON array or a comma-separated string (as exported by
/// the catalog CSV tooling).
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
        Null,
    }

    match StringOrVec::deserialize(deserializer)? {
        StringOrVec::String(s) => Ok(s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()),
        StringOrVec::Vec(v) => Ok(v),
        StringOrVec::Null => Ok(Vec::new()),
    }
}

fn deserialize_optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i32),
        Null,
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                i32::from_str(s.trim())
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
        StringOrInt::Int(i) => Ok(Some(i)),
        StringOrInt::Null => Ok(None),
    }
}

/// A full perfume row as held by the in-memory store or loaded from a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfumeRecord {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub accords: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub top_notes: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub heart_notes: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub base_notes: Vec<String>,
    #[serde(
        alias = "releaseYear",
        default,
        deserialize_with = "deserialize_optional_i32"
    )]
    pub release_year: Option<i32>,
    #[serde(alias = "searchCount", default)]
    pub search_count: i64,
}

impl PerfumeRecord {
    pub fn summary(&self) -> PerfumeSummary {
        PerfumeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            image_url: self.image_url.clone(),
            slug: self.slug.clone(),
            gender: self.gender.clone(),
            accords: self.accords.clone(),
        }
    }

    pub fn search_result(&self) -> PerfumeSearchResult {
        PerfumeSearchResult {
            id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            image_url: self.image_url.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Read-only projection returned by the scent bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PerfumeSummary {
    pub id: String,
    #[schema(example = "Santal 33")]
    pub name: String,
    #[schema(example = "Le Labo")]
    pub brand: String,
    pub image_url: Option<String>,
    pub slug: String,
    #[schema(example = "for women and men")]
    pub gender: Option<String>,
    #[schema(example = json!(["woody", "leather"]))]
    pub accords: Vec<String>,
}

/// Projection returned by autocomplete search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PerfumeSearchResult {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub image_url: Option<String>,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_csv_style_lists() {
        let record: PerfumeRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Terre",
            "brand": "Hermes",
            "accords": "woody, citrus,",
            "releaseYear": "2006",
            "top_notes": ["orange"]
        }))
        .unwrap();

        assert_eq!(record.accords, vec!["woody", "citrus"]);
        assert_eq!(record.release_year, Some(2006));
        assert_eq!(record.top_notes, vec!["orange"]);
        assert!(record.heart_notes.is_empty());
        assert_eq!(record.search_count, 0);
    }

    #[test]
    fn test_blank_year_is_none() {
        let record: PerfumeRecord = serde_json::from_value(serde_json::json!({
            "id": "p2",
            "name": "Unknown",
            "brand": "Nobody",
            "release_year": ""
        }))
        .unwrap();
        assert_eq!(record.release_year, None);
    }
}
