//! HTTP-to-OCR-to-queue bridge.
//!
//! `POST /analyze` takes a base64 note image, sends it to the OCR provider and
//! publishes the recognition result to a durable RabbitMQ queue.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ocr;
pub mod queue;
