use crate::domain::receipt::model::ExtractedAmount;

/// Name of the amount input on the expense-entry form.
pub const AMOUNT_FIELD: &str = "newExpenseAmount";

/// Write access to the amount field of a pending expense-entry form.
///
/// The scan workflow never reads other fields and never submits the form.
pub trait ExpenseForm: Send + Sync {
    fn set_amount(&self, amount: ExtractedAmount);
}
