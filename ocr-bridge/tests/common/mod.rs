// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Mutex, Once};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use base64::{engine::general_purpose::STANDARD, Engine};

use ocr_bridge::config::{Config, OcrConfig, QueueConfig, ServerConfig};
use ocr_bridge::error::{BridgeError, Result};
use ocr_bridge::models::AnalysisResult;
use ocr_bridge::queue::ResultPublisher;

pub const TEST_SECRET: &str = "test-secret";
pub const OCR_PATH: &str = "/custom/v1/general";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn ocr_config(api_url: Option<String>) -> OcrConfig {
    OcrConfig {
        api_url,
        secret_key: Some(TEST_SECRET.to_string()),
        timeout_secs: 5,
    }
}

pub fn test_config(api_url: Option<String>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_bytes: 1024 * 1024,
        },
        ocr: ocr_config(api_url),
        queue: QueueConfig::default(),
    }
}

/// Base64 of a minimal JPEG header.
pub fn jpeg_base64() -> String {
    STANDARD.encode([
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
    ])
}

/// Base64 of a minimal PNG header.
pub fn png_base64() -> String {
    STANDARD.encode([
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ])
}

pub fn ocr_success_body(texts: &[&str]) -> serde_json::Value {
    let fields: Vec<_> = texts
        .iter()
        .map(|text| serde_json::json!({ "valueType": "ALL", "inferText": text, "inferConfidence": 0.99 }))
        .collect();

    serde_json::json!({
        "version": "V2",
        "requestId": "req",
        "timestamp": 1,
        "images": [
            { "uid": "u1", "name": "image", "inferResult": "SUCCESS", "message": "SUCCESS", "fields": fields }
        ]
    })
}

pub fn analyze_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Keeps every published result as JSON.
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<serde_json::Value>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<serde_json::Value> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultPublisher for RecordingPublisher {
    async fn publish(&self, result: &AnalysisResult) -> Result<()> {
        let value = serde_json::to_value(result)?;
        self.published.lock().unwrap().push(value);
        Ok(())
    }

    fn destination(&self) -> &str {
        "test.results"
    }
}

/// Behaves like a broker that refuses every connection.
#[derive(Default)]
pub struct RefusingPublisher {
    attempts: Mutex<usize>,
}

impl RefusingPublisher {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl ResultPublisher for RefusingPublisher {
    async fn publish(&self, _result: &AnalysisResult) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(BridgeError::Publish("connection refused".to_string()))
    }

    fn destination(&self) -> &str {
        "test.results"
    }
}
