use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::receipt::errors::ReceiptError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ReceiptError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ReceiptError::ImageMissing => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "receipt.image_missing",
            ),
            ReceiptError::EncodingFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EncodingError",
                "receipt.encoding_failed",
            ),
            ReceiptError::OcrServiceFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "OcrServiceError",
                "receipt.ocr_service_failed",
            ),
            ReceiptError::TotalNotFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ExtractionError",
                "receipt.total_not_found",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
