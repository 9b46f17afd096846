use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{Expense, ExpenseUpdate};
use crate::models::Validate;
use crate::storage::repository::Repository;

/// Expense bookkeeping over an injected repository. No derived logic.
pub struct ExpenseService;

impl ExpenseService {
    pub fn new() -> Self {
        Self
    }

    /// Store a new expense. The amount is re-checked in case the record was
    /// built by hand rather than through [`Expense::new`].
    pub fn add_expense<R: Repository<Expense>>(&self, repo: &mut R, expense: Expense) -> Result<Uuid, CoreError> {
        if let Err(e) = expense.validate() {
            tracing::warn!(amount = expense.amount, "rejected expense with invalid amount");
            return Err(e);
        }
        let id = expense.id;
        tracing::info!(expense_id = %id, user_id = %expense.user_id, category = %expense.category, "expense added");
        repo.append(vec![expense])?;
        Ok(id)
    }

    /// Apply a partial update and return the updated expense.
    pub fn update_expense<R: Repository<Expense>>(
        &self,
        repo: &mut R,
        expense_id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<Expense, CoreError> {
        let mut all = repo.list()?;
        let expense = all
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| CoreError::ExpenseNotFound(expense_id.to_string()))?;
        expense.apply(update)?;
        let updated = expense.clone();
        repo.replace(all)?;
        Ok(updated)
    }

    /// Remove an expense. Returns `false` when no expense has that id.
    pub fn remove_expense<R: Repository<Expense>>(&self, repo: &mut R, expense_id: Uuid) -> Result<bool, CoreError> {
        let mut all = repo.list()?;
        let before = all.len();
        all.retain(|e| e.id != expense_id);
        if all.len() == before {
            return Ok(false);
        }
        repo.replace(all)?;
        tracing::info!(%expense_id, "expense removed");
        Ok(true)
    }

    /// Expenses owned by `user_id`, newest date first.
    pub fn expenses_for_user<R: Repository<Expense>>(&self, repo: &R, user_id: &str) -> Result<Vec<Expense>, CoreError> {
        let mut expenses: Vec<Expense> = repo.list()?.into_iter().filter(|e| e.user_id == user_id).collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }
}

impl Default for ExpenseService {
    fn default() -> Self {
        Self::new()
    }
}
