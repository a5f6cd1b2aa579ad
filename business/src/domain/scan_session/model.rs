use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ScanSessionError;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::ExtractedAmount;
use crate::domain::receipt::value_objects::SelectedFile;

/// Identity of one open/close cycle of the scan modal.
///
/// Async work carries the token it started under and is dropped if the
/// token is no longer the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scan progress. The amount only exists in the `Extracted` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStatus {
    Idle,
    Scanning,
    Extracted(ExtractedAmount),
    Failed(ReceiptError),
}

impl ScanStatus {
    pub fn result(&self) -> Option<ExtractedAmount> {
        match self {
            ScanStatus::Extracted(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ReceiptError> {
        match self {
            ScanStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanStatus::Scanning)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStatus::Idle => write!(f, "idle"),
            ScanStatus::Scanning => write!(f, "scanning"),
            ScanStatus::Extracted(_) => write!(f, "extracted"),
            ScanStatus::Failed(_) => write!(f, "failed"),
        }
    }
}

/// State of the scan modal between open and close.
#[derive(Debug, Clone)]
pub struct ScanSession {
    token: SessionToken,
    selected_file: Option<SelectedFile>,
    status: ScanStatus,
    opened_at: DateTime<Utc>,
}

impl ScanSession {
    pub fn open() -> Self {
        Self {
            token: SessionToken::new(),
            selected_file: None,
            status: ScanStatus::Idle,
            opened_at: Utc::now(),
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn status(&self) -> &ScanStatus {
        &self.status
    }

    pub fn result(&self) -> Option<ExtractedAmount> {
        self.status.result()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Stages a file. Any previous outcome is cleared back to `Idle`.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ScanSessionError> {
        if self.status.is_scanning() {
            return Err(ScanSessionError::ScanInProgress);
        }
        self.selected_file = Some(file);
        self.status = ScanStatus::Idle;
        Ok(())
    }

    /// Moves to `Scanning` and hands back the file to process.
    pub fn start_scan(&mut self) -> Result<SelectedFile, ScanSessionError> {
        if self.status.is_scanning() {
            return Err(ScanSessionError::ScanInProgress);
        }
        let file = self
            .selected_file
            .clone()
            .ok_or(ScanSessionError::NoFileSelected)?;
        self.status = ScanStatus::Scanning;
        Ok(file)
    }

    /// Records the outcome of the running scan. Returns false if no scan was running.
    pub fn finish(&mut self, outcome: Result<ExtractedAmount, ReceiptError>) -> bool {
        if !self.status.is_scanning() {
            return false;
        }
        self.status = match outcome {
            Ok(amount) => ScanStatus::Extracted(amount),
            Err(error) => ScanStatus::Failed(error),
        };
        true
    }

    /// Copies what a client needs to render the modal, leaving the image behind.
    pub fn view(&self) -> ScanSessionView {
        ScanSessionView {
            token: self.token,
            status: self.status.clone(),
            file_name: self.selected_file.as_ref().map(|file| file.name().to_string()),
            opened_at: self.opened_at,
        }
    }
}

/// Image-free copy of a session's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSessionView {
    pub token: SessionToken,
    pub status: ScanStatus,
    pub file_name: Option<String>,
    pub opened_at: DateTime<Utc>,
}

impl ScanSessionView {
    pub fn result(&self) -> Option<ExtractedAmount> {
        self.status.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> SelectedFile {
        SelectedFile::from_bytes("receipt.png", vec![1, 2, 3])
    }

    #[test]
    fn should_open_idle_without_file() {
        let session = ScanSession::open();
        assert_eq!(session.status(), &ScanStatus::Idle);
        assert!(session.selected_file().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn should_describe_session_without_image_payload() {
        let mut session = ScanSession::open();
        session.select_file(receipt()).unwrap();

        let view = session.view();

        assert_eq!(view.token, session.token());
        assert_eq!(view.status, ScanStatus::Idle);
        assert_eq!(view.file_name.as_deref(), Some("receipt.png"));
        assert_eq!(view.opened_at, session.opened_at());
        assert!(view.result().is_none());
    }

    #[test]
    fn should_give_each_session_a_fresh_token() {
        assert_ne!(ScanSession::open().token(), ScanSession::open().token());
    }

    #[test]
    fn should_reject_scan_without_file() {
        let mut session = ScanSession::open();
        assert_eq!(session.start_scan(), Err(ScanSessionError::NoFileSelected));
        assert_eq!(session.status(), &ScanStatus::Idle);
    }

    #[test]
    fn should_reject_second_scan_while_scanning() {
        let mut session = ScanSession::open();
        session.select_file(receipt()).unwrap();
        session.start_scan().unwrap();

        assert_eq!(session.start_scan(), Err(ScanSessionError::ScanInProgress));
        assert_eq!(
            session.select_file(receipt()),
            Err(ScanSessionError::ScanInProgress)
        );
        assert_eq!(session.status(), &ScanStatus::Scanning);
    }

    #[test]
    fn should_hold_result_only_when_extracted() {
        let mut session = ScanSession::open();
        session.select_file(receipt()).unwrap();
        session.start_scan().unwrap();

        let amount = ExtractedAmount::new(14000.0).unwrap();
        assert!(session.finish(Ok(amount)));
        assert_eq!(session.result(), Some(amount));

        session.select_file(receipt()).unwrap();
        assert_eq!(session.status(), &ScanStatus::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn should_record_failure() {
        let mut session = ScanSession::open();
        session.select_file(receipt()).unwrap();
        session.start_scan().unwrap();

        assert!(session.finish(Err(ReceiptError::TotalNotFound)));
        assert_eq!(session.status().error(), Some(&ReceiptError::TotalNotFound));
        assert!(session.result().is_none());
    }

    #[test]
    fn should_ignore_finish_when_not_scanning() {
        let mut session = ScanSession::open();
        let amount = ExtractedAmount::new(1.0).unwrap();
        assert!(!session.finish(Ok(amount)));
        assert_eq!(session.status(), &ScanStatus::Idle);
    }

    #[test]
    fn should_display_status_names() {
        assert_eq!(ScanStatus::Idle.to_string(), "idle");
        assert_eq!(ScanStatus::Scanning.to_string(), "scanning");
        assert_eq!(
            ScanStatus::Failed(ReceiptError::TotalNotFound).to_string(),
            "failed"
        );
    }
}
