use crate::{
    config::Config,
    error::ApiError,
    models::{BotResponse, ChatRequest, ErrorResponse},
    services::{support::answer_support, ScentBot},
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use tracing::info;

pub fn chat_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat").route(web::post().to(ask_scent_bot)));
}

/// Ask the scent assistant for perfume suggestions
///
/// Extracts accords, vibes, gender and search terms from a free-text message
/// and returns matching perfumes with a short explanation. An empty or
/// unrecognised message returns recent releases.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply with up to three perfumes", body = BotResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Perfume lookup failed", body = ErrorResponse),
    )
)]
pub async fn ask_scent_bot(
    request: Json<ChatRequest>,
    scent_bot: web::Data<ScentBot>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    if config.support_intercept {
        if let Some(reply) = answer_support(&request.message) {
            info!("Answered platform support question");
            return Ok(HttpResponse::Ok().json(reply));
        }
    }

    let reply = scent_bot.answer(&request.message).await?;
    Ok(HttpResponse::Ok().json(reply))
}
