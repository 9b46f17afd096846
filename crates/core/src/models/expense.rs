use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Validate;
use crate::errors::CoreError;

/// Spending category of an expense.
/// Serialized with the lowercase names the web client stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Savings,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Savings,
        ExpenseCategory::Other,
    ];

    /// Vietnamese label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Ăn uống",
            ExpenseCategory::Transportation => "Đi lại",
            ExpenseCategory::Entertainment => "Giải trí",
            ExpenseCategory::Shopping => "Mua sắm",
            ExpenseCategory::Healthcare => "Y tế",
            ExpenseCategory::Education => "Giáo dục",
            ExpenseCategory::Savings => "Tiết kiệm",
            ExpenseCategory::Other => "Khác",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Healthcare => "healthcare",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Savings => "savings",
            ExpenseCategory::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A single spending event.
///
/// `date` is when the money was spent; `created_at` is when it was logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,

    /// Owner reference. Only used for filtering.
    pub user_id: String,

    /// Non-negative, currency-agnostic amount
    pub amount: f64,

    pub category: ExpenseCategory,

    #[serde(default)]
    pub description: String,

    /// Calendar date of the spending (daily granularity)
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build a new expense, rejecting negative or non-finite amounts.
    pub fn new(
        user_id: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            amount,
            category,
            description: description.into(),
            date,
            created_at,
        })
    }

    /// Apply a partial update. Nothing changes if validation fails.
    pub fn apply(&mut self, update: ExpenseUpdate) -> Result<(), CoreError> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        Ok(())
    }
}

impl Validate for Expense {
    fn validate(&self) -> Result<(), CoreError> {
        validate_amount(self.amount)
    }
}

/// Partial update of an [`Expense`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::InvalidExpenseAmount(amount));
    }
    Ok(())
}
