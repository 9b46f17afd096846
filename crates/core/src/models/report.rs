use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::expense::ExpenseCategory;
use super::progress::BudgetProgress;

/// Full report for one budget: progress, where the money went, and advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget: Budget,

    pub progress: BudgetProgress,

    /// Spending per category, largest first
    pub category_breakdown: Vec<CategorySpend>,

    /// Spending per 7-day slice of the window, oldest first
    pub weekly_trend: Vec<WeeklySpend>,

    /// Free-text advice (Vietnamese), at most three entries
    pub recommendations: Vec<String>,
}

/// Spending of a single category inside a budget window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub spent: f64,
    /// Share of the budget's total spend (0 when nothing was spent)
    pub percentage: f64,
}

/// Spending of one 7-day slice, counted from the window start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySpend {
    /// "Week 1", "Week 2", ...
    pub week: String,
    pub starts_on: NaiveDate,
    pub spent: f64,
}
