use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::services::ImageEncoderService;
use business::domain::receipt::value_objects::{Base64Image, ImageSource, SelectedFile};

/// Reads the selected image and base64-encodes it off the async executor.
pub struct Base64ImageEncoder;

impl Base64ImageEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Base64ImageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEncoderService for Base64ImageEncoder {
    async fn encode(&self, file: &SelectedFile) -> Result<Base64Image, ReceiptError> {
        match file.source() {
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    ReceiptError::encoding(format!("cannot read {}: {}", path.display(), e))
                })?;
                encode_bytes(bytes).await
            }
            ImageSource::Bytes(bytes) => encode_bytes(bytes.clone()).await,
            ImageSource::DataUrl(raw) => {
                let image = Base64Image::from_data_url(raw)?;
                verify_payload(&image)?;
                Ok(image)
            }
        }
    }
}

/// Rejects payloads that are not base64 or decode to nothing.
fn verify_payload(image: &Base64Image) -> Result<(), ReceiptError> {
    let decoded = BASE64
        .decode(image.as_str())
        .map_err(|e| ReceiptError::encoding(format!("payload is not valid base64: {}", e)))?;
    if decoded.is_empty() {
        return Err(ReceiptError::encoding("payload decodes to an empty image"));
    }
    Ok(())
}

async fn encode_bytes(bytes: Vec<u8>) -> Result<Base64Image, ReceiptError> {
    if bytes.is_empty() {
        return Err(ReceiptError::encoding("empty image file"));
    }

    let encoded = tokio::task::spawn_blocking(move || BASE64.encode(&bytes))
        .await
        .map_err(|e| ReceiptError::encoding(format!("encoder task failed: {}", e)))?;

    Base64Image::from_data_url(&encoded)
}
