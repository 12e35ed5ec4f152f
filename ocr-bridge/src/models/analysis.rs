use serde::Serialize;

use super::NoteImageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Error,
}

/// Outcome of one OCR analysis, as published to the result queue.
///
/// Success and error shapes are mutually exclusive and both carry the
/// `noteImageId`:
///
/// ```json
/// { "noteImageId": 7, "recognizedText": "Hello World" }
/// { "noteImageId": 7, "recognizedText": null, "status": "error", "message": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    note_image_id: NoteImageId,
    recognized_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<AnalysisStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl AnalysisResult {
    pub fn recognized(note_image_id: NoteImageId, text: impl Into<String>) -> Self {
        Self {
            note_image_id,
            recognized_text: Some(text.into()),
            status: None,
            message: None,
        }
    }

    pub fn failed(note_image_id: NoteImageId, message: impl Into<String>) -> Self {
        Self {
            note_image_id,
            recognized_text: None,
            status: Some(AnalysisStatus::Error),
            message: Some(message.into()),
        }
    }

    pub fn note_image_id(&self) -> &NoteImageId {
        &self.note_image_id
    }

    pub fn recognized_text(&self) -> Option<&str> {
        self.recognized_text.as_deref()
    }

    pub fn status(&self) -> Option<AnalysisStatus> {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.status == Some(AnalysisStatus::Error)
    }
}
