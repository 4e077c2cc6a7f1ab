//! CI log analysis service using LLM
//!
//! Renders the analysis prompt, obtains a completion and normalizes the
//! model's reply into an [`AnalysisResult`].

use std::sync::Arc;

use crate::model::{AnalysisRequest, AnalysisResult};
use crate::service::analysis::normalize::normalize;
use crate::service::analysis::prompts::{ANALYSIS_SYSTEM_PROMPT, build_analysis_prompt};
use crate::service::llm::{CompletionClient, CompletionPrompt};

pub mod error;
pub mod normalize;
pub mod prompts;

pub use error::AnalysisError;

/// Service for analyzing CI/CD error logs
#[derive(Clone)]
pub struct AnalysisService {
    llm_client: Arc<dyn CompletionClient>,
}

impl AnalysisService {
    /// Creates a new analysis service backed by the given completion client
    pub fn new(llm_client: Arc<dyn CompletionClient>) -> Self {
        tracing::info!(
            model = %llm_client.model(),
            "Log analysis service initialized"
        );

        Self { llm_client }
    }

    /// Analyze an error log and return structured debugging assistance
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        request.validate()?;

        let start_time = std::time::Instant::now();

        let prompt = CompletionPrompt {
            system: ANALYSIS_SYSTEM_PROMPT.to_string(),
            user: build_analysis_prompt(request),
        };

        tracing::debug!(
            language = %request.language,
            log_length = request.log_text.len(),
            model = %self.llm_client.model(),
            "Requesting log analysis"
        );

        let raw = match self.llm_client.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    language = %request.language,
                    model = %self.llm_client.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Completion for log analysis failed"
                );
                return Err(e.into());
            }
        };

        let result = normalize(&raw).inspect_err(|e| {
            tracing::warn!(
                language = %request.language,
                response_length = raw.len(),
                error = %e,
                "Could not normalize AI response"
            );
        })?;

        tracing::info!(
            language = %request.language,
            error_type = %result.error_type,
            fixes_count = result.fixes.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Log analysis completed"
        );

        Ok(result)
    }
}
