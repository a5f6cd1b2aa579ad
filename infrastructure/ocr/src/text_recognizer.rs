use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::model::RecognizedText;
use business::domain::receipt::services::OcrService;
use business::domain::receipt::value_objects::Base64Image;

use crate::client::OcrHttpClient;

const MAX_ERROR_BODY: usize = 200;

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    image_base64: &'a str,
}

/// The service answers with either a list of lines or one newline-separated blob.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecognizeResponse {
    Lines { lines: Vec<String> },
    Text { text: String },
}

pub struct OcrServiceHttp {
    client: OcrHttpClient,
}

impl OcrServiceHttp {
    pub fn new(client: OcrHttpClient) -> Self {
        Self { client }
    }

    fn parse_response(body: &str) -> Result<RecognizedText, ReceiptError> {
        let parsed: RecognizeResponse = serde_json::from_str(body)
            .map_err(|e| ReceiptError::ocr_service(format!("malformed response: {}", e)))?;

        let raw = match parsed {
            RecognizeResponse::Lines { lines } => lines,
            RecognizeResponse::Text { text } => text.lines().map(str::to_string).collect(),
        };
        Ok(RecognizedText::new(normalize_lines(raw)))
    }
}

/// Trims lines, collapses whitespace runs, glues stray ` :` to the key and
/// drops lines left empty.
pub fn normalize_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .replace(" :", ":")
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl OcrService for OcrServiceHttp {
    async fn recognize(&self, image: &Base64Image) -> Result<RecognizedText, ReceiptError> {
        let mut request = self
            .client
            .client
            .post(&self.client.endpoint)
            .header("Content-Type", "application/json")
            .json(&RecognizeRequest {
                image_base64: image.as_str(),
            });
        if let Some(auth) = self.client.auth_header() {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReceiptError::ocr_service(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReceiptError::ocr_service(format!(
                "OCR service error ({}): {}",
                status,
                truncate(&body)
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReceiptError::ocr_service(format!("unreadable body: {}", e)))?;

        Self::parse_response(&body)
    }
}
