use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config).map_err(std::io::Error::other)?;
    let analysis_service = web::Data::new(state.analysis_service);
    let cors_config = config.cors.clone();
    let max_body_bytes = config.max_body_bytes;

    tracing::info!(
        model = %config.llm.model,
        origins = ?cors_config.allowed_origins,
        max_body_bytes = max_body_bytes,
        "Starting FailSense API server on {}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors(&cors_config))
            .app_data(analysis_service.clone())
            .configure(api::health::configure)
            .configure(api::analyze::configure(max_body_bytes))
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
