use axum::Json;
use utoipa::OpenApi;

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OCR Bridge API",
        version = "1.0.0",
        description = "Recognizes text in note images and publishes the result to the analysis queue.",
    ),
    paths(handlers::analyze::analyze, handlers::health::health_check),
    components(schemas(
        crate::models::NoteImageId,
        dto::AnalyzeRequest,
        dto::AnalyzeResponse,
        dto::ErrorResponse,
        handlers::health::HealthData,
        handlers::health::OcrStatus,
        handlers::health::QueueStatus,
    )),
    tags(
        (name = "analysis", description = "Image text recognition"),
        (name = "health", description = "Health check"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
