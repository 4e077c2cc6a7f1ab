//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::health::HealthStatus;
use crate::model::{AnalysisRequest, AnalysisResult, Fix};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FailSense API",
        description = "AI-Powered CI Error Debugging Assistant"
    ),
    paths(crate::api::analyze::analyze, crate::api::health::health),
    components(schemas(
        AnalysisRequest,
        AnalysisResult,
        Fix,
        ErrorResponse,
        HealthStatus
    )),
    tags(
        (name = "analysis", description = "CI/CD error log analysis"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    #[test]
    fn test_document_lists_endpoints() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "FailSense API");
        assert!(doc.paths.paths.contains_key("/api/analyze"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[actix_web::test]
    async fn test_openapi_json_endpoint() {
        let app = actix_test::init_service(App::new().configure(configure)).await;

        let req = actix_test::TestRequest::get()
            .uri("/openapi.json")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["title"], "FailSense API");
        assert!(body["components"]["schemas"]["AnalysisResult"].is_object());
    }
}
