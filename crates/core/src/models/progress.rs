use serde::{Deserialize, Serialize};

/// Snapshot of a budget's spending at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Sum of matching expenses inside the window
    pub spent: f64,

    /// `amount - spent`; negative once the budget is blown
    pub remaining: f64,

    /// `spent / amount * 100`
    pub percentage: f64,

    /// `spent > amount`
    pub is_over_budget: bool,

    /// Whole days until the window closes, never negative
    pub days_remaining: i64,

    /// Even per-day share of the limit over the full window
    pub daily_budget: f64,

    /// Current burn rate extrapolated to the full window
    pub projected_spending: f64,
}
