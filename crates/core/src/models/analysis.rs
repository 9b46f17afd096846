use serde::{Deserialize, Serialize};

use super::expense::ExpenseCategory;

/// Rule-based spending analysis over a set of expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseAnalysis {
    pub total_amount: f64,
    pub transaction_count: usize,
    /// Human-readable observations (Vietnamese)
    pub insights: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub trends: SpendingTrends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrends {
    /// Total spread over an assumed 30-day month, rounded
    pub average_daily: f64,
    /// Category with the largest total, if any expense exists
    pub top_category: Option<ExpenseCategory>,
    /// 15% of total spend, rounded
    pub savings_potential: f64,
}
