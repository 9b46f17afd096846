use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::report::CategorySpend;
use crate::models::statistics::{MonthTotal, MonthlySummary};

pub const TOP_CATEGORY_COUNT: usize = 3;
pub const RECENT_EXPENSE_COUNT: usize = 5;
/// Months shown on the statistics chart.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Calendar-month aggregations for the dashboard and statistics views.
///
/// Pure: `now` is passed in and only picks the current month.
pub struct StatisticsService;

impl StatisticsService {
    pub fn new() -> Self {
        Self
    }

    /// Current vs. previous month, top categories, average and latest records.
    pub fn monthly_summary(&self, expenses: &[Expense], now: DateTime<Utc>) -> MonthlySummary {
        let (year, month) = (now.year(), now.month());
        let (prev_year, prev_month) = previous_month(year, month);

        let current = month_total(expenses, year, month);
        let previous = month_total(expenses, prev_year, prev_month);
        let change_percentage = if previous.total > 0.0 {
            (current.total - previous.total) / previous.total * 100.0
        } else {
            0.0
        };

        let mut totals: HashMap<ExpenseCategory, f64> = HashMap::new();
        for expense in expenses.iter().filter(|e| in_month(e, year, month)) {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        let mut top_categories: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category, spent)| CategorySpend {
                category,
                spent,
                percentage: if current.total > 0.0 {
                    spent / current.total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        top_categories.sort_by(|a, b| {
            b.spent
                .partial_cmp(&a.spent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.category.cmp(&b.category))
        });
        top_categories.truncate(TOP_CATEGORY_COUNT);

        let average_per_transaction = if expenses.is_empty() {
            0.0
        } else {
            expenses.iter().map(|e| e.amount).sum::<f64>() / expenses.len() as f64
        };

        let mut recent_expenses = expenses.to_vec();
        recent_expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        recent_expenses.truncate(RECENT_EXPENSE_COUNT);

        tracing::debug!(
            year,
            month,
            current = current.total,
            previous = previous.total,
            "monthly summary computed"
        );

        MonthlySummary {
            current,
            previous,
            change_percentage,
            top_categories,
            average_per_transaction,
            recent_expenses,
        }
    }

    /// Totals for the last `months` calendar months, oldest first, ending
    /// with the month containing `now`. Empty months are included.
    pub fn monthly_trend(&self, expenses: &[Expense], now: DateTime<Utc>, months: u32) -> Vec<MonthTotal> {
        let mut trend = Vec::with_capacity(months as usize);
        let (mut year, mut month) = (now.year(), now.month());
        for _ in 0..months {
            trend.push(month_total(expenses, year, month));
            (year, month) = previous_month(year, month);
        }
        trend.reverse();
        trend
    }
}

impl Default for StatisticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn in_month(expense: &Expense, year: i32, month: u32) -> bool {
    expense.date.year() == year && expense.date.month() == month
}

fn month_total(expenses: &[Expense], year: i32, month: u32) -> MonthTotal {
    let (total, transaction_count) = expenses
        .iter()
        .filter(|e| in_month(e, year, month))
        .fold((0.0, 0), |(sum, n), e| (sum + e.amount, n + 1));
    MonthTotal {
        year,
        month,
        label: format!("{month:02}/{year}"),
        total,
        transaction_count,
    }
}
