use crate::{
    config::Config,
    error::{ApiError, Result},
    handlers,
    models::{
        BotResponse, ChatRequest, ErrorResponse, HealthResponse, PerfumeSearchResult,
        PerfumeSummary, SearchResponse,
    },
    routes::{api_routes, openapi_route},
    services::{dictionaries, CatalogService, ScentBot},
    store::{MemoryPerfumeStore, PerfumeStore, PgPerfumeStore},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::{net::TcpListener, sync::Arc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::chat::ask_scent_bot,
        handlers::perfumes::search_perfumes,
        handlers::perfumes::record_search,
    ),
    components(schemas(
        ChatRequest,
        BotResponse,
        PerfumeSummary,
        PerfumeSearchResult,
        SearchResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Assistant", description = "Keyword-based scent assistant"),
        (name = "Perfumes", description = "Perfume catalog lookups"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Shared handler state, cloned into every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub scent_bot: web::Data<ScentBot>,
    pub catalog: web::Data<CatalogService>,
    pub config: web::Data<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn PerfumeStore>, config: &Config) -> Self {
        let scent_bot =
            ScentBot::new(store.clone()).with_max_message_chars(config.max_message_chars);

        Self {
            scent_bot: web::Data::new(scent_bot),
            catalog: web::Data::new(CatalogService::new(store)),
            config: web::Data::new(config.clone()),
        }
    }

    /// Registers state, body limits and every route on an actix app.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let json_config = web::JsonConfig::default()
            .limit(self.config.json_limit_bytes)
            .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into());

        cfg.app_data(json_config)
            .app_data(self.scent_bot.clone())
            .app_data(self.catalog.clone())
            .app_data(self.config.clone())
            .service(openapi_route())
            .service(api_routes());
    }
}

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        dictionaries::validate().context("Keyword tables are inconsistent")?;

        let store = build_store(&self.config).await?;
        let state = AppState::new(store, &self.config);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .configure(|cfg| state.configure(cfg))
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}

/// Postgres when a database URL is configured, otherwise an in-memory
/// catalog (seeded from `SEED_FILE` when given).
async fn build_store(config: &Config) -> Result<Arc<dyn PerfumeStore>> {
    if let Some(url) = &config.database_url {
        info!("Connecting to Postgres...");
        let store = PgPerfumeStore::connect(url, config.database_max_connections)
            .await
            .context("Failed to connect to Postgres")?;
        return Ok(Arc::new(store));
    }

    let store = match &config.seed_file {
        Some(path) => MemoryPerfumeStore::from_json_file(path)
            .with_context(|| format!("Failed to load seed file {}", path))?,
        None => {
            warn!("No DATABASE_URL or SEED_FILE configured, serving an empty catalog");
            MemoryPerfumeStore::default()
        }
    };

    Ok(Arc::new(store))
}
