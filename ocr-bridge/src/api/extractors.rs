use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::BridgeError;

/// `Json` extractor whose rejections use the service's `{"error": ...}` body.
///
/// A body that cannot be read as an `AnalyzeRequest` is a server-side failure
/// (500); only absent required fields are reported as 400 by validation.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BridgeError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for BridgeError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> BridgeError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            BridgeError::MalformedBody(format!("Invalid request body: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            BridgeError::MalformedBody(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            BridgeError::MalformedBody(
                "Missing `Content-Type: application/json` header".to_string(),
            )
        }
        JsonRejection::BytesRejection(err) => {
            if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                BridgeError::PayloadTooLarge("Request body is too large".to_string())
            } else {
                BridgeError::Internal(format!("Failed to read request body: {}", err.body_text()))
            }
        }
        _ => BridgeError::MalformedBody(rejection.body_text()),
    }
}
