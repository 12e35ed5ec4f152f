use serde::Deserialize;
use std::env;

/// Queue the downstream note service listens on.
pub const DEFAULT_RESULT_QUEUE: &str = "note.analyze.result";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

/// Connection settings for the external OCR provider.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub api_url: Option<String>,
    pub secret_key: Option<String>,
    pub timeout_secs: u64,
}

impl OcrConfig {
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.secret_key.is_some()
    }
}

/// Broker connection and target queue for analysis results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    pub url: Option<String>,
    pub result_queue: String,
    pub connect_timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            secret_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: None,
            result_queue: DEFAULT_RESULT_QUEUE.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("OCR_BRIDGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("OCR_BRIDGE_PORT", 5000),
                max_body_bytes: parse_env_or("OCR_BRIDGE_MAX_BODY_BYTES", 32 * 1024 * 1024),
            },
            ocr: OcrConfig {
                api_url: env_non_empty("NAVER_OCR_API_URL"),
                secret_key: env_non_empty("NAVER_OCR_SECRET_KEY"),
                timeout_secs: parse_env_or("NAVER_OCR_TIMEOUT", 30),
            },
            queue: QueueConfig {
                url: env_non_empty("RABBITMQ_URL"),
                result_queue: env_non_empty("RABBITMQ_RESULT_QUEUE")
                    .unwrap_or_else(|| DEFAULT_RESULT_QUEUE.to_string()),
                connect_timeout_secs: parse_env_or("RABBITMQ_CONNECT_TIMEOUT", 10),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Logs which settings were picked up. Secrets are reported only as present/absent.
    pub fn log_summary(&self) {
        fn presence(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "set"
            } else {
                "missing"
            }
        }

        tracing::info!(
            api_url = self.ocr.api_url.as_deref().unwrap_or("missing"),
            secret_key = presence(&self.ocr.secret_key),
            timeout_secs = self.ocr.timeout_secs,
            "OCR provider settings"
        );
        tracing::info!(
            url = presence(&self.queue.url),
            result_queue = %self.queue.result_queue,
            connect_timeout_secs = self.queue.connect_timeout_secs,
            "Broker settings"
        );

        if !self.ocr.is_configured() {
            tracing::warn!(
                "NAVER_OCR_API_URL or NAVER_OCR_SECRET_KEY is not set - every analysis will publish an error result"
            );
        }
        if self.queue.url.is_none() {
            tracing::warn!("RABBITMQ_URL is not set - /analyze will fail to publish results");
        }
    }
}
