use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use business::application::scan_session::controller::{ScanDependencies, ScanSessionController};

use super::model::PendingExpenseForm;

/// A pending form together with the scan modal it hosts.
#[derive(Clone)]
pub struct HostedForm {
    pub form: Arc<PendingExpenseForm>,
    pub scanner: Arc<ScanSessionController>,
}

/// In-process registry of pending expense forms. Nothing here outlives the process.
pub struct ExpenseFormStore {
    deps: ScanDependencies,
    forms: RwLock<HashMap<Uuid, HostedForm>>,
}

impl ExpenseFormStore {
    pub fn new(deps: ScanDependencies) -> Self {
        Self {
            deps,
            forms: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a form with its own scan controller.
    pub fn create(&self) -> HostedForm {
        let form = Arc::new(PendingExpenseForm::new());
        let scanner = Arc::new(ScanSessionController::new(
            self.deps.clone(),
            form.clone(),
        ));
        let hosted = HostedForm { form, scanner };

        self.forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hosted.form.id(), hosted.clone());
        self.deps
            .logger
            .debug(&format!("Expense form {} created", hosted.form.id()));
        hosted
    }

    pub fn get(&self, id: Uuid) -> Option<HostedForm> {
        self.forms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Forgets the form. Its modal is closed first, so a scan still running
    /// finds its session gone and never writes.
    pub fn remove(&self, id: Uuid) -> Option<HostedForm> {
        let hosted = self.get(id)?;
        hosted.scanner.close();

        let removed = self
            .forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if removed.is_some() {
            self.deps
                .logger
                .debug(&format!("Expense form {} removed", id));
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.forms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
