use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use business::domain::expense::form::ExpenseForm;
use business::domain::receipt::model::ExtractedAmount;

/// An expense-entry form that has not been submitted yet.
///
/// Only the amount field lives here; it is the single field a scan may fill.
#[derive(Debug)]
pub struct PendingExpenseForm {
    id: Uuid,
    created_at: DateTime<Utc>,
    amount: RwLock<Option<ExtractedAmount>>,
}

impl PendingExpenseForm {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            amount: RwLock::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn amount(&self) -> Option<ExtractedAmount> {
        *self.amount.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PendingExpenseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseForm for PendingExpenseForm {
    fn set_amount(&self, amount: ExtractedAmount) {
        *self.amount.write().unwrap_or_else(PoisonError::into_inner) = Some(amount);
    }
}
