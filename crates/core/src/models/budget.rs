use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::ExpenseCategory;
use super::Validate;
use crate::errors::CoreError;

/// Length of a budget's window, counted from its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Seven days
    Weekly,
    /// One calendar month
    Monthly,
    /// One calendar year
    Yearly,
    /// Any unrecognized period. The window ends at `end_date`, or at "now" when absent.
    #[serde(other)]
    Custom,
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Weekly => write!(f, "weekly"),
            BudgetPeriod::Monthly => write!(f, "monthly"),
            BudgetPeriod::Yearly => write!(f, "yearly"),
            BudgetPeriod::Custom => write!(f, "custom"),
        }
    }
}

/// A spending limit over a window anchored at `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,

    pub user_id: String,

    /// Display label, not unique
    pub name: String,

    /// The limit. Always positive.
    pub amount: f64,

    pub period: BudgetPeriod,

    /// Category filter. Empty means the budget covers every category.
    #[serde(default)]
    pub categories: Vec<ExpenseCategory>,

    pub start_date: NaiveDate,

    /// Only consulted for [`BudgetPeriod::Custom`].
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Inactive budgets never raise alerts.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Build an active budget. Rejects a non-positive or non-finite `amount`.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        period: BudgetPeriod,
        categories: Vec<ExpenseCategory>,
        start_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            amount,
            period,
            categories: dedup_categories(categories),
            start_date,
            end_date: None,
            is_active: true,
            created_at,
        })
    }

    /// Set an explicit end date (used by custom-period budgets).
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether an expense of `category` counts against this budget.
    pub fn covers(&self, category: ExpenseCategory) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    /// Apply a partial update. Nothing changes if validation fails.
    pub fn apply(&mut self, update: BudgetUpdate) -> Result<(), CoreError> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
            self.amount = amount;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(period) = update.period {
            self.period = period;
        }
        if let Some(categories) = update.categories {
            self.categories = dedup_categories(categories);
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}

/// Partial update of a [`Budget`]; `None` fields are left untouched.
///
/// `end_date: Some(None)` clears the explicit end date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
    pub categories: Option<Vec<ExpenseCategory>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
}

/// The instants a budget applies to. Both ends are inclusive when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Validate for Budget {
    fn validate(&self) -> Result<(), CoreError> {
        validate_amount(self.amount)
    }
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::InvalidBudgetAmount(amount));
    }
    Ok(())
}

fn dedup_categories(mut categories: Vec<ExpenseCategory>) -> Vec<ExpenseCategory> {
    let mut seen = std::collections::HashSet::new();
    categories.retain(|c| seen.insert(*c));
    categories
}
