use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::expense::form::{AMOUNT_FIELD, ExpenseForm};
use crate::domain::logger::Logger;
use crate::domain::receipt::amount_extractor::AmountExtractor;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::ExtractedAmount;
use crate::domain::receipt::services::{ImageEncoderService, OcrService};
use crate::domain::receipt::value_objects::SelectedFile;
use crate::domain::scan_session::errors::ScanSessionError;
use crate::domain::scan_session::model::{ScanSession, ScanSessionView, ScanStatus, SessionToken};

/// Collaborators shared by every scan controller.
#[derive(Clone)]
pub struct ScanDependencies {
    pub encoder: Arc<dyn ImageEncoderService>,
    pub ocr: Arc<dyn OcrService>,
    pub extractor: AmountExtractor,
    pub logger: Arc<dyn Logger>,
}

/// Proof that a scan was accepted. Only `begin_scan` hands these out.
#[derive(Debug)]
pub struct ScanTicket {
    token: SessionToken,
    file: SelectedFile,
}

impl ScanTicket {
    pub fn token(&self) -> SessionToken {
        self.token
    }
}

/// What a finished pipeline run amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Extracted(ExtractedAmount),
    Failed(ReceiptError),
    /// The session was closed before the result arrived; nothing was written.
    Discarded,
}

/// Drives the scan modal of one expense-entry form.
///
/// Every transition goes through the session held here. The pipeline
/// (encode, recognize, extract) runs without holding the lock and checks
/// the session token after each suspension point, so results of a closed
/// session never reach the form.
pub struct ScanSessionController {
    deps: ScanDependencies,
    form: Arc<dyn ExpenseForm>,
    session: Mutex<Option<ScanSession>>,
}

impl ScanSessionController {
    pub fn new(deps: ScanDependencies, form: Arc<dyn ExpenseForm>) -> Self {
        Self {
            deps,
            form,
            session: Mutex::new(None),
        }
    }

    /// Opens the modal with a fresh session, discarding any previous one.
    pub fn open(&self) -> SessionToken {
        let session = ScanSession::open();
        let token = session.token();
        let previous = self.lock().replace(session);

        if let Some(previous) = previous {
            self.deps.logger.debug(&format!(
                "Scan session {} replaced while {}",
                previous.token(),
                previous.status()
            ));
        }
        self.deps
            .logger
            .info(&format!("Scan session {} opened", token));
        token
    }

    /// Closes the modal. A scan still in flight becomes inert.
    pub fn close(&self) {
        if let Some(session) = self.lock().take() {
            self.deps.logger.info(&format!(
                "Scan session {} closed while {}",
                session.token(),
                session.status()
            ));
        }
    }

    pub fn select_file(&self, file: SelectedFile) -> Result<(), ScanSessionError> {
        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(ScanSessionError::NotOpen)?;
        let name = file.name().to_string();
        session.select_file(file)?;

        self.deps.logger.debug(&format!(
            "Scan session {} staged file {}",
            session.token(),
            name
        ));
        Ok(())
    }

    /// Validates and enters `Scanning`. Rejections leave the state as it was.
    pub fn begin_scan(&self) -> Result<ScanTicket, ScanSessionError> {
        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(ScanSessionError::NotOpen)?;
        let file = session.start_scan().inspect_err(|err| {
            self.deps.logger.warn(&format!(
                "Scan request rejected for session {}: {}",
                session.token(),
                err
            ));
        })?;

        self.deps.logger.info(&format!(
            "Scanning {} for session {}",
            file.name(),
            session.token()
        ));
        Ok(ScanTicket {
            token: session.token(),
            file,
        })
    }

    /// Runs encode, recognize and extract for an accepted scan. One attempt, no retries.
    pub async fn run_scan(&self, ticket: ScanTicket) -> ScanOutcome {
        let ScanTicket { token, file } = ticket;

        let image = match self.deps.encoder.encode(&file).await {
            Ok(image) => image,
            Err(err) => return self.finish(token, Err(err)),
        };
        if !self.is_current(token) {
            return self.discard(token, "encoding");
        }

        let text = match self.deps.ocr.recognize(&image).await {
            Ok(text) => text,
            Err(err) => return self.finish(token, Err(err)),
        };
        if !self.is_current(token) {
            return self.discard(token, "text recognition");
        }

        self.deps.logger.debug(&format!(
            "Session {} received {} recognized lines",
            token,
            text.len()
        ));
        let result = self
            .deps
            .extractor
            .extract(&text)
            .ok_or(ReceiptError::TotalNotFound);
        self.finish(token, result)
    }

    pub async fn trigger_scan(&self) -> Result<ScanOutcome, ScanSessionError> {
        let ticket = self.begin_scan()?;
        Ok(self.run_scan(ticket).await)
    }

    /// Current status; `Idle` when the modal is closed.
    pub fn status(&self) -> ScanStatus {
        self.lock()
            .as_ref()
            .map(|session| session.status().clone())
            .unwrap_or(ScanStatus::Idle)
    }

    /// Current session without the staged image; `None` when the modal is closed.
    pub fn snapshot(&self) -> Option<ScanSessionView> {
        self.lock().as_ref().map(ScanSession::view)
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|session| session.token() == token)
    }

    fn finish(
        &self,
        token: SessionToken,
        result: Result<ExtractedAmount, ReceiptError>,
    ) -> ScanOutcome {
        // The form write happens under the session lock so a concurrent
        // close either lands before it (result dropped) or after it.
        let mut guard = self.lock();
        let Some(session) = guard.as_mut().filter(|s| s.token() == token) else {
            return self.discard(token, "completion");
        };

        match &result {
            Ok(amount) => {
                self.form.set_amount(*amount);
                self.deps.logger.info(&format!(
                    "Session {} extracted total {} into {}",
                    token, amount, AMOUNT_FIELD
                ));
            }
            Err(ReceiptError::TotalNotFound) => {
                self.deps.logger.warn(&format!(
                    "Session {} found no total in recognized text",
                    token
                ));
            }
            Err(err) => {
                self.deps.logger.error(&format!(
                    "Session {} scan failed: {} ({})",
                    token,
                    err,
                    err.reason().unwrap_or("no detail")
                ));
            }
        }

        session.finish(result.clone());
        match result {
            Ok(amount) => ScanOutcome::Extracted(amount),
            Err(err) => ScanOutcome::Failed(err),
        }
    }

    fn discard(&self, token: SessionToken, stage: &str) -> ScanOutcome {
        self.deps.logger.debug(&format!(
            "Dropping result of closed session {} after {}",
            token, stage
        ));
        ScanOutcome::Discarded
    }

    fn lock(&self) -> MutexGuard<'_, Option<ScanSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
