//! OCR (Optical Character Recognition) Module
//!
//! Sends note images to an external OCR provider and reduces its response to a
//! single [`AnalysisResult`](crate::models::AnalysisResult).
//!
//! # Architecture
//!
//! - `format` sniffs the image type from the first decoded bytes of the base64 payload
//! - `api` owns the provider wire format and the HTTP client
//! - `bridge` drives one analysis and turns every failure into an error-shaped result
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `api_url`: provider endpoint (`NAVER_OCR_API_URL`)
//! - `secret_key`: sent as `X-OCR-SECRET` (`NAVER_OCR_SECRET_KEY`)
//! - `timeout_secs`: bound on each provider call
//!
//! # Usage
//!
//! ```rust,ignore
//! let bridge = OcrBridge::new(&config.ocr);
//! let result = bridge.analyze(&image_base64, Some("page.jpg"), &note_image_id).await;
//! ```

pub mod api;
mod bridge;
mod format;

pub use bridge::{no_text_message, OcrBridge, DEFAULT_IMAGE_NAME};
pub use format::{detect_image_format, guess_format, FormatGuess, DEFAULT_FORMAT};
