/// Rejected scan-session requests. State is left untouched on every variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanSessionError {
    #[error("scan_session.not_open")]
    NotOpen,
    #[error("scan_session.no_file_selected")]
    NoFileSelected,
    #[error("scan_session.scan_in_progress")]
    ScanInProgress,
}
