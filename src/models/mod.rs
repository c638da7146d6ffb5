use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use perfume::{PerfumeRecord, PerfumeSearchResult, PerfumeSummary};

mod perfume;

/// Request structure for the scent assistant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Free-text message from the user
    #[schema(example = "a fresh citrus scent for the office")]
    #[serde(default)]
    pub message: String,
}

/// Reply from the scent assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BotResponse {
    /// Natural-language explanation of the picks
    pub text: String,
    /// Up to three matching perfumes
    pub perfumes: Vec<PerfumeSummary>,
}

/// Query parameters for autocomplete search
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Name, brand or note; at least two characters
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<PerfumeSearchResult>,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Invalid input: Perfume id cannot be empty")]
    pub error: String,
}
