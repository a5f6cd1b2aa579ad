use async_trait::async_trait;

use super::errors::ReceiptError;
use super::model::RecognizedText;
use super::value_objects::{Base64Image, SelectedFile};

/// Service port for turning a selected image into a base64 payload.
///
/// Implementations must not block the executor while reading the file.
#[async_trait]
pub trait ImageEncoderService: Send + Sync {
    async fn encode(&self, file: &SelectedFile) -> Result<Base64Image, ReceiptError>;
}

/// Service port for the external text-recognition engine.
///
/// One call, no retries. Lines come back in the engine's reading order.
#[async_trait]
pub trait OcrService: Send + Sync {
    async fn recognize(&self, image: &Base64Image) -> Result<RecognizedText, ReceiptError>;
}
