use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::scan_session::errors::ScanSessionError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

/// Failure to resolve the `:id` path segment to a hosted form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormLookupError {
    InvalidId,
    NotFound,
}

impl IntoErrorResponse for FormLookupError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match self {
            FormLookupError::InvalidId => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "expense_form.invalid_id",
            ),
            FormLookupError::NotFound => {
                (StatusCode::NOT_FOUND, "NotFound", "expense_form.not_found")
            }
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}

impl IntoErrorResponse for ScanSessionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ScanSessionError::NotOpen => (
                StatusCode::CONFLICT,
                "ConflictError",
                "scan_session.not_open",
            ),
            ScanSessionError::NoFileSelected => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "scan_session.no_file_selected",
            ),
            ScanSessionError::ScanInProgress => (
                StatusCode::CONFLICT,
                "ConflictError",
                "scan_session.scan_in_progress",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
