use std::env;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://localhost:5000/ocr";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the external OCR service.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OcrConfig {
    /// Environment variables:
    /// - OCR_SERVICE_URL: recognition endpoint (default: "http://localhost:5000/ocr")
    /// - OCR_API_KEY: bearer token, optional
    /// - OCR_TIMEOUT_SECS: transport timeout (default: 30)
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("OCR_SERVICE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            api_key: env::var("OCR_API_KEY").ok(),
            timeout: parse_timeout(env::var("OCR_TIMEOUT_SECS").ok().as_deref()),
        }
    }
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    let secs = match raw.map(str::trim) {
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                tracing::warn!(
                    "Ignoring invalid OCR_TIMEOUT_SECS={:?}, using {}s",
                    value,
                    DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }
        },
        None => DEFAULT_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}
