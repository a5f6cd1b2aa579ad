use std::time::Duration;

use reqwest::Client;

/// Shared HTTP client configuration for the OCR service.
pub struct OcrHttpClient {
    pub client: Client,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl OcrHttpClient {
    /// The timeout is the only deadline a scan gets; callers add none of their own.
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Builds the authorization header value, if a key is configured.
    pub fn auth_header(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(|key| format!("Bearer {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_bearer_header_when_key_present() {
        let client = OcrHttpClient::new(
            "http://localhost:5000/ocr".to_string(),
            Some("secret".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(client.auth_header(), Some("Bearer secret".to_string()));
    }

    #[test]
    fn should_skip_header_without_key() {
        let client = OcrHttpClient::new(
            "http://localhost:5000/ocr".to_string(),
            Some(String::new()),
            Duration::from_secs(5),
        );
        assert_eq!(client.auth_header(), None);
    }
}
