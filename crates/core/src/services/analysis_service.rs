use std::collections::HashMap;

use crate::format::{format_percent, format_vnd};
use crate::models::analysis::{ExpenseAnalysis, Priority, Recommendation, SpendingTrends};
use crate::models::expense::{Expense, ExpenseCategory};

/// Days the average-daily figure is spread over.
const ASSUMED_DAYS: f64 = 30.0;
/// Share of spending assumed to be saveable.
const SAVINGS_POTENTIAL_RATE: f64 = 0.15;
/// More records than this counts as a good logging habit.
const HABIT_THRESHOLD: usize = 10;

/// Rule-based spending insights ("AI analysis" in the app).
///
/// Pure: derives everything from the expenses passed in.
pub struct AnalysisService;

impl AnalysisService {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_expenses(&self, expenses: &[Expense]) -> ExpenseAnalysis {
        let total: f64 = expenses.iter().map(|e| e.amount).sum();

        let mut totals: HashMap<ExpenseCategory, f64> = HashMap::new();
        for expense in expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        // Ties go to the category listed first in ExpenseCategory::ALL.
        let top = ExpenseCategory::ALL
            .iter()
            .filter_map(|c| totals.get(c).map(|amount| (*c, *amount)))
            .fold(None::<(ExpenseCategory, f64)>, |best, (c, amount)| match best {
                Some((_, best_amount)) if best_amount >= amount => best,
                _ => Some((c, amount)),
            });

        let average_daily = total / ASSUMED_DAYS;

        let mut insights = vec![format!(
            "Bạn đã chi tiêu tổng cộng {} ₫ trong {} giao dịch",
            format_vnd(total),
            expenses.len()
        )];
        if let Some((category, amount)) = top {
            let share = if total > 0.0 { amount / total * 100.0 } else { 0.0 };
            insights.push(format!(
                "Danh mục \"{}\" chiếm {}% tổng chi tiêu",
                category.label(),
                format_percent(share)
            ));
        }
        insights.push(format!(
            "Chi tiêu trung bình mỗi ngày là {} ₫",
            format_vnd(average_daily)
        ));
        insights.push(if expenses.len() > HABIT_THRESHOLD {
            "Bạn có thói quen ghi chép chi tiêu khá tốt".to_string()
        } else {
            "Nên ghi chép chi tiêu thường xuyên hơn để theo dõi tốt hơn".to_string()
        });

        let category_total = |c: ExpenseCategory| totals.get(&c).copied().unwrap_or(0.0);
        let mut recommendations = Vec::new();

        if category_total(ExpenseCategory::Food) > total * 0.4 {
            recommendations.push(recommendation(
                Priority::High,
                "Tối ưu chi phí ăn uống",
                "Chi phí ăn uống chiếm tỷ lệ cao. Hãy thử nấu ăn tại nhà nhiều hơn để tiết kiệm.",
            ));
        }
        if category_total(ExpenseCategory::Entertainment) > total * 0.3 {
            recommendations.push(recommendation(
                Priority::Medium,
                "Cân bằng chi phí giải trí",
                "Chi phí giải trí khá cao. Hãy tìm các hoạt động giải trí miễn phí hoặc chi phí thấp.",
            ));
        }
        if category_total(ExpenseCategory::Savings) > 0.0 {
            recommendations.push(recommendation(
                Priority::Low,
                "Tuyệt vời! Bạn đã tiết kiệm",
                "Bạn đã có ý thức tiết kiệm. Hãy duy trì và tăng dần số tiền tiết kiệm mỗi tháng.",
            ));
        } else {
            recommendations.push(recommendation(
                Priority::High,
                "Bắt đầu tiết kiệm",
                "Hãy dành ít nhất 10-20% thu nhập để tiết kiệm cho tương lai.",
            ));
        }

        tracing::debug!(records = expenses.len(), total, "expenses analyzed");

        ExpenseAnalysis {
            total_amount: total,
            transaction_count: expenses.len(),
            insights,
            recommendations,
            trends: SpendingTrends {
                average_daily: average_daily.round(),
                top_category: top.map(|(c, _)| c),
                savings_potential: (total * SAVINGS_POTENTIAL_RATE).max(0.0).round(),
            },
        }
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

fn recommendation(priority: Priority, title: &str, description: &str) -> Recommendation {
    Recommendation {
        priority,
        title: title.to_string(),
        description: description.to_string(),
    }
}
