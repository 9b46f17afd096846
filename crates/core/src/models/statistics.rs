use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::report::CategorySpend;

/// Spending of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// "MM/YYYY"
    pub label: String,
    pub total: f64,
    pub transaction_count: usize,
}

/// Dashboard figures for the month containing `now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub current: MonthTotal,
    pub previous: MonthTotal,

    /// Month-over-month change in percent, 0 when the previous month is empty
    pub change_percentage: f64,

    /// Largest categories of the current month, at most three
    pub top_categories: Vec<CategorySpend>,

    /// Mean amount over every expense passed in, not only this month's
    pub average_per_transaction: f64,

    /// Newest expenses by date, at most five
    pub recent_expenses: Vec<Expense>,
}
