//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::analysis::AnalysisError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub detail: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Request body could not be decoded (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Analysis pipeline failure, status depends on the variant
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Analysis(AnalysisError::Validation(_)) => "validation_error",
            ApiError::Analysis(AnalysisError::Configuration(_)) => "configuration_error",
            ApiError::Analysis(AnalysisError::Upstream(_)) => "upstream_error",
            ApiError::Analysis(AnalysisError::MalformedResponse(_)) => "malformed_response",
            ApiError::Analysis(AnalysisError::Processing(_)) => "processing_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Analysis(AnalysisError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "Rejected request"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            detail: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("bad json".into()), 400),
            (AnalysisError::Validation("empty".into()).into(), 400),
            (AnalysisError::Configuration("no key".into()).into(), 500),
            (AnalysisError::Upstream("timeout".into()).into(), 500),
            (AnalysisError::MalformedResponse("eof".into()).into(), 500),
            (AnalysisError::Processing("shape".into()).into(), 500),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code().as_u16(), expected, "{:?}", err);
        }
    }

    #[test]
    fn test_detail_keeps_analysis_message() {
        let err: ApiError = AnalysisError::MalformedResponse("EOF while parsing".into()).into();
        assert_eq!(err.to_string(), "Failed to parse AI response: EOF while parsing");
        assert_eq!(err.error_type(), "malformed_response");
    }
}
