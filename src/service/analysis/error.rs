//! Error types for log analysis

use thiserror::Error;

use crate::service::llm::CompletionError;

/// Error type for log analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Request rejected before any upstream call
    #[error("{0}")]
    Validation(String),

    /// Completion service credential is not configured
    #[error("{0}")]
    Configuration(String),

    /// Completion service could not be reached or answered with an error
    #[error("Analysis failed: {0}")]
    Upstream(String),

    /// Completion text did not contain parseable JSON
    #[error("Failed to parse AI response: {0}")]
    MalformedResponse(String),

    /// Parsed JSON had a shape that cannot be turned into a result
    #[error("Analysis failed: {0}")]
    Processing(String),
}

impl From<CompletionError> for AnalysisError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MissingCredential => AnalysisError::Configuration(
                "GROQ_API_KEY not found in environment variables".to_string(),
            ),
            CompletionError::Upstream(msg) => AnalysisError::Upstream(msg),
        }
    }
}
