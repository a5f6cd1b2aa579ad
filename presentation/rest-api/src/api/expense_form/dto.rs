use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::expense::form::AMOUNT_FIELD;
use business::domain::scan_session::model::{ScanSessionView, ScanStatus};
use memory::expense_form::model::PendingExpenseForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum ScanStatusDto {
    #[oai(rename = "idle")]
    Idle,
    #[oai(rename = "scanning")]
    Scanning,
    #[oai(rename = "extracted")]
    Extracted,
    #[oai(rename = "failed")]
    Failed,
}

impl From<&ScanStatus> for ScanStatusDto {
    fn from(status: &ScanStatus) -> Self {
        match status {
            ScanStatus::Idle => ScanStatusDto::Idle,
            ScanStatus::Scanning => ScanStatusDto::Scanning,
            ScanStatus::Extracted(_) => ScanStatusDto::Extracted,
            ScanStatus::Failed(_) => ScanStatusDto::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ExpenseFormResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Name of the field a scan fills
    pub amount_field: String,
    pub amount: Option<f64>,
}

impl From<&PendingExpenseForm> for ExpenseFormResponse {
    fn from(form: &PendingExpenseForm) -> Self {
        Self {
            id: form.id(),
            created_at: form.created_at(),
            amount_field: AMOUNT_FIELD.to_string(),
            amount: form.amount().map(|amount| amount.value()),
        }
    }
}

/// Scan modal state as seen by the client.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ScanSessionResponse {
    pub open: bool,
    pub token: Option<Uuid>,
    pub status: ScanStatusDto,
    pub selected_file: Option<String>,
    pub result: Option<f64>,
    /// Error code of the last failed scan
    pub error: Option<String>,
    pub opened_at: Option<DateTime<Utc>>,
}

impl From<Option<ScanSessionView>> for ScanSessionResponse {
    fn from(session: Option<ScanSessionView>) -> Self {
        match session {
            Some(session) => Self {
                open: true,
                token: Some(session.token.as_uuid()),
                status: (&session.status).into(),
                result: session.result().map(|amount| amount.value()),
                error: session.status.error().map(|err| err.to_string()),
                selected_file: session.file_name,
                opened_at: Some(session.opened_at),
            },
            None => Self {
                open: false,
                token: None,
                status: ScanStatusDto::Idle,
                selected_file: None,
                result: None,
                error: None,
                opened_at: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct SelectFileRequest {
    pub file_name: String,
    /// Base64 image, optionally as a `data:image/...;base64,` URL
    pub image_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ScanAcceptedResponse {
    /// Session the running scan belongs to
    pub token: Uuid,
    pub status: ScanStatusDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::receipt::errors::ReceiptError;
    use business::domain::receipt::model::ExtractedAmount;
    use business::domain::receipt::value_objects::SelectedFile;
    use business::domain::scan_session::model::ScanSession;

    #[test]
    fn should_describe_closed_session() {
        let response = ScanSessionResponse::from(None::<ScanSessionView>);

        assert!(!response.open);
        assert_eq!(response.status, ScanStatusDto::Idle);
        assert!(response.token.is_none());
        assert!(response.result.is_none());
    }

    #[test]
    fn should_describe_extracted_session() {
        let mut session = ScanSession::open();
        session
            .select_file(SelectedFile::from_bytes("receipt.jpg", vec![1, 2, 3]))
            .unwrap();
        session.start_scan().unwrap();
        session.finish(Ok(ExtractedAmount::new(42.5).unwrap()));

        let response = ScanSessionResponse::from(Some(session.view()));

        assert!(response.open);
        assert_eq!(response.token, Some(session.token().as_uuid()));
        assert_eq!(response.status, ScanStatusDto::Extracted);
        assert_eq!(response.selected_file.as_deref(), Some("receipt.jpg"));
        assert_eq!(response.result, Some(42.5));
        assert!(response.error.is_none());
    }

    #[test]
    fn should_expose_error_code_of_failed_scan() {
        let mut session = ScanSession::open();
        session
            .select_file(SelectedFile::from_bytes("receipt.jpg", vec![1]))
            .unwrap();
        session.start_scan().unwrap();
        session.finish(Err(ReceiptError::TotalNotFound));

        let response = ScanSessionResponse::from(Some(session.view()));

        assert_eq!(response.status, ScanStatusDto::Failed);
        assert_eq!(response.error.as_deref(), Some("receipt.total_not_found"));
        assert!(response.result.is_none());
    }

    #[test]
    fn should_report_form_amount_field() {
        let form = PendingExpenseForm::new();

        let response = ExpenseFormResponse::from(&form);

        assert_eq!(response.id, form.id());
        assert_eq!(response.amount_field, "newExpenseAmount");
        assert!(response.amount.is_none());
    }
}
