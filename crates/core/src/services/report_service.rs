use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::errors::CoreError;
use crate::format::format_vnd;
use crate::models::budget::Budget;
use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::progress::BudgetProgress;
use crate::models::report::{BudgetReport, CategorySpend, WeeklySpend};
use crate::services::budget_service::{midnight, BudgetService};

/// Builds a [`BudgetReport`] from the progress calculator's output.
pub struct ReportService {
    budget_service: BudgetService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            budget_service: BudgetService::new(),
        }
    }

    /// Progress, per-category breakdown, weekly trend and recommendations for one budget.
    pub fn generate_budget_report(
        &self,
        budget: &Budget,
        expenses: &[Expense],
        now: DateTime<Utc>,
    ) -> Result<BudgetReport, CoreError> {
        let progress = self.budget_service.compute_progress(budget, expenses, now)?;
        let window = self.budget_service.budget_window(budget, now);
        let relevant = self.budget_service.relevant_expenses(budget, expenses, &window);

        // Category breakdown
        let mut by_category: HashMap<ExpenseCategory, f64> = HashMap::new();
        for expense in &relevant {
            *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        let mut category_breakdown: Vec<CategorySpend> = by_category
            .into_iter()
            .map(|(category, spent)| CategorySpend {
                category,
                spent,
                percentage: if progress.spent > 0.0 {
                    spent / progress.spent * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        category_breakdown.sort_by(|a, b| {
            b.spent
                .partial_cmp(&a.spent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.category.cmp(&b.category))
        });

        // Weekly trend: 7-day slices from the window start. Only weeks with
        // spending get an entry, so a long custom window stays small.
        let start_day = window.start.date_naive();
        let mut by_week: BTreeMap<i64, f64> = BTreeMap::new();
        for expense in &relevant {
            let week = (midnight(expense.date) - window.start).num_days() / 7;
            *by_week.entry(week).or_insert(0.0) += expense.amount;
        }
        let weekly_trend: Vec<WeeklySpend> = by_week
            .into_iter()
            .map(|(week, spent)| WeeklySpend {
                week: format!("Week {}", week + 1),
                starts_on: start_day + Duration::days(7 * week),
                spent,
            })
            .collect();

        let recommendations = recommendations(budget, &progress);

        Ok(BudgetReport {
            budget: budget.clone(),
            progress,
            category_breakdown,
            weekly_trend,
            recommendations,
        })
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

fn recommendations(budget: &Budget, progress: &BudgetProgress) -> Vec<String> {
    let mut out = Vec::new();
    if progress.percentage > 90.0 {
        out.push(
            "Bạn đang chi tiêu gần hết ngân sách. Hãy xem xét giảm chi tiêu không cần thiết.".to_string(),
        );
    }
    if progress.projected_spending > budget.amount {
        out.push(
            "Theo xu hướng hiện tại, bạn có thể vượt ngân sách. Hãy điều chỉnh chi tiêu.".to_string(),
        );
    }
    if progress.days_remaining > 0 && progress.remaining > 0.0 {
        let per_day = progress.remaining / progress.days_remaining as f64;
        out.push(format!(
            "Bạn có thể chi tối đa {}₫ mỗi ngày trong {} ngày còn lại.",
            format_vnd(per_day),
            progress.days_remaining
        ));
    }
    out
}
