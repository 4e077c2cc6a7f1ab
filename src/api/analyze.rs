//! REST API endpoint for CI log analysis

use actix_web::{HttpResponse, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{AnalysisRequest, AnalysisResult};
use crate::service::AnalysisService;

/// Analyze a CI/CD error log
///
/// Returns the root cause, error category, up to three ranked fixes and a
/// short technical explanation.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Log analyzed successfully", body = AnalysisResult),
        (status = 400, description = "Empty log text or invalid request body", body = ErrorResponse),
        (status = 500, description = "Missing credential, upstream failure or unparseable AI response", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = service.analyze(&body).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// JSON extractor config turning undecodable or oversized bodies into
/// [`ApiError::BadRequest`]
fn json_config(max_body_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_body_bytes)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Configure analysis routes accepting bodies up to `max_body_bytes`
pub fn configure(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config(max_body_bytes)).service(analyze);
    }
}
