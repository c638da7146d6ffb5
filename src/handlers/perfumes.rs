use crate::{
    error::ApiError,
    models::{ErrorResponse, SearchParams, SearchResponse},
    services::CatalogService,
};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Autocomplete search over the perfume catalog
#[utoipa::path(
    get,
    path = "/api/perfumes/search",
    tag = "Perfumes",
    params(SearchParams),
    responses(
        (status = 200, description = "Up to eight perfumes ordered by name", body = SearchResponse),
        (status = 500, description = "Perfume lookup failed", body = ErrorResponse)
    )
)]
#[actix_web::get("/search")]
pub async fn search_perfumes(
    params: web::Query<SearchParams>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    let results = catalog.search_perfumes(&params.q).await?;
    Ok(HttpResponse::Ok().json(SearchResponse { results }))
}

/// Record that a perfume was opened from search
#[utoipa::path(
    post,
    path = "/api/perfumes/{id}/search",
    tag = "Perfumes",
    params(
        ("id" = String, Path, description = "Perfume id")
    ),
    responses(
        (status = 200, description = "Search count incremented"),
        (status = 404, description = "Unknown perfume", body = ErrorResponse)
    )
)]
#[actix_web::post("/{id}/search")]
pub async fn record_search(
    path: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    catalog.record_search(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn perfumes_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/perfumes")
            .service(search_perfumes)
            .service(record_search),
    );
}
