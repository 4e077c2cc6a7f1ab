//! Application state and service initialization
//!
//! This module centralizes service construction so that handlers receive
//! fully built services and tests can swap the completion backend.

use std::sync::Arc;

use crate::model::Config;
use crate::service::{AnalysisService, CompletionClient, GroqClient};

/// Application state containing all services
pub struct AppState {
    /// CI log analysis service
    pub analysis_service: AnalysisService,
}

impl AppState {
    /// Build application state from configuration
    ///
    /// A missing `GROQ_API_KEY` does not prevent startup; analysis requests
    /// report it until the variable is set and the service restarted.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.llm.api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not set, analysis requests will fail");
        }

        let llm_client = GroqClient::new(&config.llm)
            .map_err(|e| AppError::ClientInit(e.to_string()))?;

        Ok(Self::with_client(Arc::new(llm_client)))
    }

    /// Build application state around an existing completion client
    pub fn with_client(llm_client: Arc<dyn CompletionClient>) -> Self {
        Self {
            analysis_service: AnalysisService::new(llm_client),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Completion client could not be constructed
    #[error("Completion client initialization failed: {0}")]
    ClientInit(String),
}
