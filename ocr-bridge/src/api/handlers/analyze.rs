use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;

/// `POST /analyze`
///
/// Runs OCR on the image and publishes the outcome to the result queue. The
/// response only reports whether the result was delivered; the recognized
/// text travels on the queue.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Result published", body = AnalyzeResponse),
        (status = 400, description = "Required fields missing", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Malformed body or result could not be published", body = ErrorResponse),
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    info!(
        note_image_id = ?req.note_image_id,
        file_name = ?req.file_name,
        base64_len = req.image_base64.as_ref().map(String::len),
        "Received analysis request"
    );

    let req = req.validate()?;

    let result = state
        .bridge
        .analyze(&req.image_base64, req.file_name.as_deref(), &req.note_image_id)
        .await;

    state.publisher.publish(&result).await?;

    Ok(Json(AnalyzeResponse::success()))
}
