use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{BridgeError, Result};

pub const API_VERSION: &str = "V2";
pub const SECRET_HEADER: &str = "X-OCR-SECRET";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Request envelope for the general OCR endpoint. Always carries one image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrApiRequest<'a> {
    pub version: &'static str,
    pub request_id: String,
    pub timestamp: i64,
    pub images: Vec<OcrImagePayload<'a>>,
}

#[derive(Debug, Serialize)]
pub struct OcrImagePayload<'a> {
    pub format: String,
    pub name: String,
    pub data: &'a str,
}

impl<'a> OcrApiRequest<'a> {
    pub fn single_image(
        request_id: String,
        timestamp: i64,
        format: String,
        name: String,
        data: &'a str,
    ) -> Self {
        Self {
            version: API_VERSION,
            request_id,
            timestamp,
            images: vec![OcrImagePayload { format, name, data }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrImageResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "inferResult")]
    pub infer_result: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub fields: Vec<OcrField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrField {
    #[serde(rename = "inferText")]
    pub infer_text: String,
}

/// Provider response, classified as soon as the body is parsed.
#[derive(Debug, Clone)]
pub enum OcrApiResponse {
    Recognized { images: Vec<OcrImageResult> },
    Rejected { message: String },
}

impl OcrApiResponse {
    /// Anything other than a 200 carrying an `images` key is a rejection.
    pub fn from_parts(status: StatusCode, body: serde_json::Value) -> Result<Self> {
        if status != StatusCode::OK || body.get("images").is_none() {
            let message = match body.get("message") {
                Some(serde_json::Value::String(message)) => message.clone(),
                Some(serde_json::Value::Null) | None => UNKNOWN_ERROR.to_string(),
                Some(other) => other.to_string(),
            };
            return Ok(Self::Rejected { message });
        }

        let images: Vec<OcrImageResult> = match body {
            serde_json::Value::Object(mut map) => match map.remove("images") {
                Some(images) => serde_json::from_value(images)?,
                None => Vec::new(),
            },
            _ => Vec::new(),
        };

        Ok(Self::Recognized { images })
    }
}

/// Joins every recognized fragment with single spaces and trims the result.
pub fn flatten_text(images: &[OcrImageResult]) -> String {
    images
        .iter()
        .flat_map(|image| image.fields.iter())
        .map(|field| field.infer_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[derive(Clone, Debug)]
pub struct ClovaOcrClient {
    client: Client,
    api_url: String,
    secret_key: String,
    timeout_secs: u64,
}

impl ClovaOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let (api_url, secret_key) = match (&config.api_url, &config.secret_key) {
            (Some(url), Some(key)) => (url.clone(), key.clone()),
            _ => {
                return Err(BridgeError::Configuration(
                    "NAVER_OCR_API_URL or NAVER_OCR_SECRET_KEY is not set".to_string(),
                ))
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BridgeError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url,
            secret_key,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn recognize(&self, request: &OcrApiRequest<'_>) -> Result<OcrApiResponse> {
        let response = self
            .client
            .post(&self.api_url)
            .header(SECRET_HEADER, &self.secret_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        info!(%status, request_id = %request.request_id, "OCR response received");

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        debug!(body = %body, "OCR response body");

        let parsed = OcrApiResponse::from_parts(status, body)?;
        if let OcrApiResponse::Recognized { images } = &parsed {
            for image in images {
                if image.infer_result.as_deref().is_some_and(|r| r != "SUCCESS") {
                    warn!(
                        name = image.name.as_deref().unwrap_or_default(),
                        infer_result = image.infer_result.as_deref().unwrap_or_default(),
                        message = image.message.as_deref().unwrap_or_default(),
                        "OCR provider reported a non-success inference"
                    );
                }
            }
        }

        Ok(parsed)
    }

    fn transport_error(&self, err: reqwest::Error) -> BridgeError {
        if err.is_timeout() {
            BridgeError::Timeout(format!(
                "OCR request did not complete within {} seconds",
                self.timeout_secs
            ))
        } else {
            BridgeError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn configured() -> OcrConfig {
        OcrConfig {
            api_url: Some("https://ocr.example.com/general".to_string()),
            secret_key: Some("secret".to_string()),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_client_requires_url_and_secret() {
        let mut config = configured();
        config.secret_key = None;
        let err = ClovaOcrClient::new(&config).unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));

        let mut config = configured();
        config.api_url = None;
        assert!(ClovaOcrClient::new(&config).is_err());
    }

    #[test]
    fn test_client_with_config() {
        let client = ClovaOcrClient::new(&configured()).unwrap();
        assert_eq!(client.api_url(), "https://ocr.example.com/general");
    }

    #[test]
    fn test_request_envelope_shape() {
        let request = OcrApiRequest::single_image(
            "42".to_string(),
            1_700_000_000_000,
            "jpg".to_string(),
            "page.jpg".to_string(),
            "/9j/4AAQ",
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "version": "V2",
                "requestId": "42",
                "timestamp": 1_700_000_000_000_i64,
                "images": [{ "format": "jpg", "name": "page.jpg", "data": "/9j/4AAQ" }]
            })
        );
    }

    #[test]
    fn test_success_response_flattens_in_order() {
        let body = json!({
            "images": [
                { "inferResult": "SUCCESS", "fields": [{ "inferText": "Hello" }, { "inferText": "World" }] },
                { "inferResult": "SUCCESS", "fields": [{ "inferText": "again" }] }
            ]
        });
        match OcrApiResponse::from_parts(StatusCode::OK, body).unwrap() {
            OcrApiResponse::Recognized { images } => {
                assert_eq!(flatten_text(&images), "Hello World again");
            }
            other => panic!("expected recognized, got {other:?}"),
        }
    }

    #[test]
    fn test_image_without_fields_is_empty() {
        let body = json!({ "images": [{ "inferResult": "SUCCESS" }] });
        match OcrApiResponse::from_parts(StatusCode::OK, body).unwrap() {
            OcrApiResponse::Recognized { images } => assert_eq!(flatten_text(&images), ""),
            other => panic!("expected recognized, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_only_fragments_trim_to_empty() {
        let body = json!({ "images": [{ "fields": [{ "inferText": " " }, { "inferText": "" }] }] });
        match OcrApiResponse::from_parts(StatusCode::OK, body).unwrap() {
            OcrApiResponse::Recognized { images } => assert!(flatten_text(&images).is_empty()),
            other => panic!("expected recognized, got {other:?}"),
        }
    }

    #[test]
    fn test_non_ok_status_is_rejected_with_message() {
        let body = json!({ "code": "0002", "message": "invalid secret" });
        match OcrApiResponse::from_parts(StatusCode::UNAUTHORIZED, body).unwrap() {
            OcrApiResponse::Rejected { message } => assert_eq!(message, "invalid secret"),
            other => panic!("expected rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_images_is_rejected() {
        let body = json!({ "version": "V2" });
        match OcrApiResponse::from_parts(StatusCode::OK, body).unwrap() {
            OcrApiResponse::Rejected { message } => assert_eq!(message, "Unknown error"),
            other => panic!("expected rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_field_without_infer_text_is_a_parse_error() {
        let body = json!({ "images": [{ "fields": [{ "boundingPoly": {} }] }] });
        let err = OcrApiResponse::from_parts(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, BridgeError::Json(_)));
    }
}
