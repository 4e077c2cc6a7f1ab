//! Request and result types for CI log analysis

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::analysis::AnalysisError;

/// Maximum number of fixes returned to the caller
pub const MAX_FIXES: usize = 3;

pub const DEFAULT_ROOT_CAUSE: &str = "Unable to determine root cause";
pub const DEFAULT_ERROR_TYPE: &str = "unknown";
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Incoming analysis request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Raw CI/CD error log
    pub log_text: String,
    /// Language or ecosystem tag (python, javascript, java, ...)
    pub language: String,
}

impl AnalysisRequest {
    /// Reject requests whose log is empty after trimming whitespace
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.log_text.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "Log text cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single suggested fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Fix {
    /// Actionable instruction
    pub fix: String,
    /// Model-reported confidence, nominally in [0, 1]
    pub confidence: f64,
    pub explanation: String,
}

/// Structured analysis returned by `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub root_cause: String,
    /// Error category, see [`ErrorType`] for the tags the model is asked for
    pub error_type: String,
    /// At most [`MAX_FIXES`] fixes, in the order the model ranked them
    pub fixes: Vec<Fix>,
    pub explanation: String,
}

/// Error categories the model is asked to choose from.
///
/// Only used to render the prompt; results are not checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    Dependency,
    Syntax,
    Runtime,
    Configuration,
    TestFailure,
    Network,
    Permission,
}

impl ErrorType {
    pub const ALL: [ErrorType; 7] = [
        ErrorType::Dependency,
        ErrorType::Syntax,
        ErrorType::Runtime,
        ErrorType::Configuration,
        ErrorType::TestFailure,
        ErrorType::Network,
        ErrorType::Permission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Dependency => "dependency",
            ErrorType::Syntax => "syntax",
            ErrorType::Runtime => "runtime",
            ErrorType::Configuration => "configuration",
            ErrorType::TestFailure => "test_failure",
            ErrorType::Network => "network",
            ErrorType::Permission => "permission",
        }
    }
}
