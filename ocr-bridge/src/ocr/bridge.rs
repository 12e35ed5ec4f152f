use chrono::Utc;
use tracing::{error, info, warn, Level};

use crate::config::OcrConfig;
use crate::error::{BridgeError, Result};
use crate::models::{AnalysisResult, NoteImageId};

use super::api::{flatten_text, ClovaOcrClient, OcrApiRequest, OcrApiResponse};
use super::format::guess_format;

/// Image name sent upstream when the caller gave none.
pub const DEFAULT_IMAGE_NAME: &str = "image";

enum OcrBackend {
    Api { client: ClovaOcrClient },
    Unavailable { reason: String },
}

/// Runs one image through the OCR provider and folds every outcome into an
/// [`AnalysisResult`].
pub struct OcrBridge {
    backend: OcrBackend,
}

pub fn no_text_message(note_image_id: &NoteImageId) -> String {
    format!("noteImageId:{note_image_id}에서 텍스트를 감지하지 못했습니다.")
}

/// Provider rejections are expected outcomes; everything else is an outage.
fn failure_level(err: &BridgeError) -> Level {
    match err {
        BridgeError::Upstream(_) => Level::WARN,
        _ => Level::ERROR,
    }
}

impl OcrBridge {
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match ClovaOcrClient::new(config) {
            Ok(client) => {
                info!(api_url = client.api_url(), "OCR API backend initialized");
                OcrBackend::Api { client }
            }
            Err(e) => {
                let reason = match e {
                    BridgeError::Configuration(reason) => reason,
                    other => other.to_string(),
                };
                warn!("OCR backend unavailable: {}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Self { backend }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    /// Never fails: transport, provider and configuration failures all come
    /// back as an error-shaped result.
    pub async fn analyze(
        &self,
        image_base64: &str,
        file_name: Option<&str>,
        note_image_id: &NoteImageId,
    ) -> AnalysisResult {
        match self.try_analyze(image_base64, file_name, note_image_id).await {
            Ok(result) => result,
            Err(e) => {
                if failure_level(&e) == Level::WARN {
                    warn!(
                        note_image_id = %note_image_id,
                        error = %e,
                        "OCR provider rejected the request"
                    );
                } else {
                    error!(note_image_id = %note_image_id, error = %e, "Analysis failed");
                }
                AnalysisResult::failed(note_image_id.clone(), e.to_string())
            }
        }
    }

    async fn try_analyze(
        &self,
        image_base64: &str,
        file_name: Option<&str>,
        note_image_id: &NoteImageId,
    ) -> Result<AnalysisResult> {
        let timestamp = Utc::now().timestamp_millis();
        let guess = guess_format(image_base64);

        info!(
            note_image_id = %note_image_id,
            file_name = file_name.unwrap_or_default(),
            format = %guess.format,
            defaulted = guess.defaulted,
            "Starting analysis"
        );

        let client = match &self.backend {
            OcrBackend::Api { client } => client,
            OcrBackend::Unavailable { reason } => {
                return Err(BridgeError::Configuration(reason.clone()))
            }
        };

        let name = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_IMAGE_NAME);
        let request = OcrApiRequest::single_image(
            note_image_id.to_string(),
            timestamp,
            guess.format,
            name.to_string(),
            image_base64,
        );

        match client.recognize(&request).await? {
            OcrApiResponse::Rejected { message } => Err(BridgeError::Upstream(message)),
            OcrApiResponse::Recognized { images } => {
                let recognized = flatten_text(&images);
                if recognized.is_empty() {
                    info!(note_image_id = %note_image_id, "No text detected");
                    Ok(AnalysisResult::recognized(
                        note_image_id.clone(),
                        no_text_message(note_image_id),
                    ))
                } else {
                    Ok(AnalysisResult::recognized(note_image_id.clone(), recognized))
                }
            }
        }
    }
}
