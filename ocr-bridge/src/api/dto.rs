use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::models::NoteImageId;

pub const MISSING_FIELDS_MESSAGE: &str = "noteImageId, imageBase64 are required";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Identifier echoed back on the result queue. Number or string.
    pub note_image_id: Option<NoteImageId>,
    /// Raw base64 or a `data:<mime>;base64,` URI.
    pub image_base64: Option<String>,
    /// Image name forwarded to the OCR provider. Defaults to `"image"`.
    pub file_name: Option<String>,
}

/// An [`AnalyzeRequest`] whose required fields are present.
#[derive(Debug, Clone)]
pub struct ValidAnalyzeRequest {
    pub note_image_id: NoteImageId,
    pub image_base64: String,
    pub file_name: Option<String>,
}

impl AnalyzeRequest {
    /// Absent, `null`, `""` and `0` all count as missing.
    pub fn validate(self) -> Result<ValidAnalyzeRequest> {
        let note_image_id = self.note_image_id.filter(|id| !id.is_blank());
        let image_base64 = self.image_base64.filter(|data| !data.is_empty());

        match (note_image_id, image_base64) {
            (Some(note_image_id), Some(image_base64)) => Ok(ValidAnalyzeRequest {
                note_image_id,
                image_base64,
                file_name: self.file_name,
            }),
            _ => Err(BridgeError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeResponse {
    pub status: String,
}

impl AnalyzeResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Error body shared by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
