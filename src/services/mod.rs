pub mod catalog;
pub mod dictionaries;
pub mod extractors;
pub mod query_builder;
pub mod response_composer;
pub mod scent_bot;
pub mod support;

// Re-export public types
pub use catalog::CatalogService;
pub use extractors::Extraction;
pub use query_builder::{build_query, Clause, PerfumeQuery};
pub use scent_bot::ScentBot;
