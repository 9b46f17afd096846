use serde::{Deserialize, Serialize};

use super::alert::BudgetAlert;
use super::budget::Budget;
use super::expense::Expense;
use super::settings::Settings;
use super::Validate;
use crate::errors::CoreError;

/// The main data container. Everything in here is serialized,
/// encrypted, and saved to the portable wallet file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletData {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub alerts: Vec<BudgetAlert>,
    pub settings: Settings,
}

impl Validate for WalletData {
    fn validate(&self) -> Result<(), CoreError> {
        self.expenses.validate()?;
        self.budgets.validate()?;
        self.alerts.validate()
    }
}
