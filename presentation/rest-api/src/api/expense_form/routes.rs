use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::value_objects::SelectedFile;
use memory::expense_form::store::{ExpenseFormStore, HostedForm};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::expense_form::dto::{
    ExpenseFormResponse, ScanAcceptedResponse, ScanSessionResponse, ScanStatusDto,
    SelectFileRequest,
};
use crate::api::expense_form::error_mapper::FormLookupError;
use crate::api::tags::ApiTags;

const DEFAULT_FILE_NAME: &str = "receipt";

pub struct ExpenseFormApi {
    store: Arc<ExpenseFormStore>,
}

impl ExpenseFormApi {
    pub fn new(store: Arc<ExpenseFormStore>) -> Self {
        Self { store }
    }

    fn find(&self, id: &str) -> Result<HostedForm, FormLookupError> {
        let uuid = Uuid::parse_str(id).map_err(|_| FormLookupError::InvalidId)?;
        self.store.get(uuid).ok_or(FormLookupError::NotFound)
    }
}

/// Expense form API
///
/// Pending expense forms and the receipt scan modal each one hosts.
#[OpenApi]
impl ExpenseFormApi {
    /// Create an expense form
    ///
    /// Starts an empty form whose amount field can be filled by a scan.
    #[oai(path = "/expense-forms", method = "post", tag = "ApiTags::ExpenseForms")]
    async fn create_form(&self) -> CreateFormResponse {
        let hosted = self.store.create();
        CreateFormResponse::Created(Json(hosted.form.as_ref().into()))
    }

    /// Get an expense form
    ///
    /// Returns the form with the amount written by the last successful scan, if any.
    #[oai(path = "/expense-forms/:id", method = "get", tag = "ApiTags::ExpenseForms")]
    async fn get_form(&self, id: Path<String>) -> GetFormResponse {
        match self.find(&id.0) {
            Ok(hosted) => GetFormResponse::Ok(Json(hosted.form.as_ref().into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => GetFormResponse::BadRequest(json),
                    _ => GetFormResponse::NotFound(json),
                }
            }
        }
    }

    /// Discard an expense form
    ///
    /// Closes its scan modal and drops the form with any staged image.
    #[oai(path = "/expense-forms/:id", method = "delete", tag = "ApiTags::ExpenseForms")]
    async fn delete_form(&self, id: Path<String>) -> DeleteFormResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                let (_status, json) = FormLookupError::InvalidId.into_error_response();
                return DeleteFormResponse::BadRequest(json);
            }
        };

        match self.store.remove(uuid) {
            Some(_) => DeleteFormResponse::NoContent,
            None => {
                let (_status, json) = FormLookupError::NotFound.into_error_response();
                DeleteFormResponse::NotFound(json)
            }
        }
    }

    /// Open the scan modal
    ///
    /// Starts a fresh scan session. A session already open is replaced and
    /// any scan it was running is discarded.
    #[oai(
        path = "/expense-forms/:id/scan-session",
        method = "post",
        tag = "ApiTags::ScanSessions"
    )]
    async fn open_session(&self, id: Path<String>) -> SessionResponse {
        match self.find(&id.0) {
            Ok(hosted) => {
                hosted.scanner.open();
                SessionResponse::Ok(Json(hosted.scanner.snapshot().into()))
            }
            Err(err) => SessionResponse::from_lookup(err),
        }
    }

    /// Get the scan modal state
    #[oai(
        path = "/expense-forms/:id/scan-session",
        method = "get",
        tag = "ApiTags::ScanSessions"
    )]
    async fn get_session(&self, id: Path<String>) -> SessionResponse {
        match self.find(&id.0) {
            Ok(hosted) => SessionResponse::Ok(Json(hosted.scanner.snapshot().into())),
            Err(err) => SessionResponse::from_lookup(err),
        }
    }

    /// Close the scan modal
    ///
    /// The session is dropped. A scan still running will not touch the form.
    #[oai(
        path = "/expense-forms/:id/scan-session",
        method = "delete",
        tag = "ApiTags::ScanSessions"
    )]
    async fn close_session(&self, id: Path<String>) -> CloseSessionResponse {
        match self.find(&id.0) {
            Ok(hosted) => {
                hosted.scanner.close();
                CloseSessionResponse::NoContent
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CloseSessionResponse::BadRequest(json),
                    _ => CloseSessionResponse::NotFound(json),
                }
            }
        }
    }

    /// Select the receipt image
    ///
    /// Stages an image for the next scan and clears the previous outcome.
    #[oai(
        path = "/expense-forms/:id/scan-session/file",
        method = "put",
        tag = "ApiTags::ScanSessions"
    )]
    async fn select_file(&self, id: Path<String>, body: Json<SelectFileRequest>) -> SessionResponse {
        let hosted = match self.find(&id.0) {
            Ok(hosted) => hosted,
            Err(err) => return SessionResponse::from_lookup(err),
        };

        let SelectFileRequest {
            file_name,
            image_base64,
        } = body.0;
        if image_base64.trim().is_empty() {
            let (_status, json) = ReceiptError::ImageMissing.into_error_response();
            return SessionResponse::BadRequest(json);
        }
        let name = match file_name.trim() {
            "" => DEFAULT_FILE_NAME.to_string(),
            name => name.to_string(),
        };

        match hosted
            .scanner
            .select_file(SelectedFile::from_data_url(name, image_base64))
        {
            Ok(()) => SessionResponse::Ok(Json(hosted.scanner.snapshot().into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SessionResponse::BadRequest(json),
                    _ => SessionResponse::Conflict(json),
                }
            }
        }
    }

    /// Scan the selected image
    ///
    /// Accepts the scan and runs it in the background. Poll the session to
    /// see the outcome; on success the amount is also written to the form.
    #[oai(
        path = "/expense-forms/:id/scan-session/scan",
        method = "post",
        tag = "ApiTags::ScanSessions"
    )]
    async fn start_scan(&self, id: Path<String>) -> StartScanResponse {
        let hosted = match self.find(&id.0) {
            Ok(hosted) => hosted,
            Err(err) => {
                let (status, json) = err.into_error_response();
                return match status.as_u16() {
                    400 => StartScanResponse::BadRequest(json),
                    _ => StartScanResponse::NotFound(json),
                };
            }
        };

        let ticket = match hosted.scanner.begin_scan() {
            Ok(ticket) => ticket,
            Err(err) => {
                let (status, json) = err.into_error_response();
                return match status.as_u16() {
                    400 => StartScanResponse::BadRequest(json),
                    _ => StartScanResponse::Conflict(json),
                };
            }
        };

        let token = ticket.token().as_uuid();
        let scanner = hosted.scanner.clone();
        tokio::spawn(async move {
            scanner.run_scan(ticket).await;
        });

        StartScanResponse::Accepted(Json(ScanAcceptedResponse {
            token,
            status: ScanStatusDto::Scanning,
        }))
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateFormResponse {
    #[oai(status = 201)]
    Created(Json<ExpenseFormResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetFormResponse {
    #[oai(status = 200)]
    Ok(Json<ExpenseFormResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteFormResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SessionResponse {
    #[oai(status = 200)]
    Ok(Json<ScanSessionResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
}

impl SessionResponse {
    fn from_lookup(err: FormLookupError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => SessionResponse::BadRequest(json),
            _ => SessionResponse::NotFound(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CloseSessionResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum StartScanResponse {
    #[oai(status = 202)]
    Accepted(Json<ScanAcceptedResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
}
