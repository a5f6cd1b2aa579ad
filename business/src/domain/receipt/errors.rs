/// Failures of the receipt pipeline.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReceiptError {
    #[error("receipt.image_missing")]
    ImageMissing,
    #[error("receipt.encoding_failed")]
    EncodingFailed(String),
    #[error("receipt.ocr_service_failed")]
    OcrServiceFailed(String),
    #[error("receipt.total_not_found")]
    TotalNotFound,
}

impl ReceiptError {
    pub fn encoding(reason: impl Into<String>) -> Self {
        ReceiptError::EncodingFailed(reason.into())
    }

    pub fn ocr_service(reason: impl Into<String>) -> Self {
        ReceiptError::OcrServiceFailed(reason.into())
    }

    /// Diagnostic detail for logs. Never shown to the user.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ReceiptError::EncodingFailed(reason) | ReceiptError::OcrServiceFailed(reason) => {
                Some(reason)
            }
            ReceiptError::ImageMissing | ReceiptError::TotalNotFound => None,
        }
    }
}
