pub mod analyze;
pub mod error;
pub mod health;
pub mod openapi;

use actix_cors::Cors;

use crate::model::CorsConfig;

/// Build the CORS middleware for the configured browser origins
pub fn cors(config: &CorsConfig) -> Cors {
    config
        .allowed_origins
        .iter()
        .filter(|origin| {
            let wildcard = origin.trim() == "*";
            if wildcard {
                tracing::warn!("Ignoring wildcard CORS origin, credentials require explicit origins");
            }
            !wildcard
        })
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
