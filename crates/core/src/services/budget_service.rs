use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::alert::BudgetAlert;
use crate::models::budget::{Budget, BudgetPeriod, BudgetUpdate, BudgetWindow};
use crate::models::expense::Expense;
use crate::models::progress::BudgetProgress;
use crate::models::Validate;
use crate::storage::repository::Repository;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Budget bookkeeping and the progress calculator.
///
/// The calculations are pure: they take `now` as an argument and never read
/// the wall clock, so the same inputs always give the same progress.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    // ── CRUD ────────────────────────────────────────────────────────

    /// Store a new budget. Its amount is re-checked in case the record was
    /// built by hand rather than through [`Budget::new`].
    pub fn add_budget<R: Repository<Budget>>(&self, repo: &mut R, budget: Budget) -> Result<Uuid, CoreError> {
        budget.validate()?;
        let id = budget.id;
        tracing::info!(budget_id = %id, user_id = %budget.user_id, period = %budget.period, "budget added");
        repo.append(vec![budget])?;
        Ok(id)
    }

    /// Apply a partial update and return the updated budget.
    pub fn update_budget<R: Repository<Budget>>(
        &self,
        repo: &mut R,
        budget_id: Uuid,
        update: BudgetUpdate,
    ) -> Result<Budget, CoreError> {
        let mut budgets = repo.list()?;
        let budget = budgets
            .iter_mut()
            .find(|b| b.id == budget_id)
            .ok_or_else(|| CoreError::BudgetNotFound(budget_id.to_string()))?;
        budget.apply(update)?;
        let updated = budget.clone();
        repo.replace(budgets)?;
        Ok(updated)
    }

    /// Delete a budget together with every alert raised for it.
    /// Returns `false` when no budget has that id.
    pub fn delete_budget<B, A>(&self, budgets: &mut B, alerts: &mut A, budget_id: Uuid) -> Result<bool, CoreError>
    where
        B: Repository<Budget>,
        A: Repository<BudgetAlert>,
    {
        let mut all = budgets.list()?;
        let before = all.len();
        all.retain(|b| b.id != budget_id);
        if all.len() == before {
            return Ok(false);
        }
        budgets.replace(all)?;

        let mut all_alerts = alerts.list()?;
        let alerts_before = all_alerts.len();
        all_alerts.retain(|a| a.budget_id != budget_id);
        let alerts_removed = alerts_before - all_alerts.len();
        if alerts_removed > 0 {
            alerts.replace(all_alerts)?;
        }

        tracing::info!(%budget_id, alerts_removed, "budget deleted");
        Ok(true)
    }

    /// Budgets owned by `user_id`, in stored order.
    pub fn budgets_for_user<R: Repository<Budget>>(&self, repo: &R, user_id: &str) -> Result<Vec<Budget>, CoreError> {
        Ok(repo.list()?.into_iter().filter(|b| b.user_id == user_id).collect())
    }

    // ── Progress ────────────────────────────────────────────────────

    /// The window a budget applies to: start of `start_date` plus one period.
    ///
    /// Month and year steps roll over when the day does not exist in the
    /// target month: Jan 31 + 1 month is Mar 3 (Mar 2 in a leap year), and
    /// Feb 29 + 1 year is Mar 1. A custom period ends at `end_date`, or at
    /// `now` when none is set.
    pub fn budget_window(&self, budget: &Budget, now: DateTime<Utc>) -> BudgetWindow {
        let start_day = budget.start_date;
        let end = match budget.period {
            BudgetPeriod::Weekly => start_day.checked_add_signed(Duration::days(7)).map(midnight),
            BudgetPeriod::Monthly => add_months_rolling(start_day, 1).map(midnight),
            BudgetPeriod::Yearly => add_months_rolling(start_day, 12).map(midnight),
            BudgetPeriod::Custom => Some(budget.end_date.map(midnight).unwrap_or(now)),
        };
        BudgetWindow {
            start: midnight(start_day),
            // Only unreachable dates at the end of chrono's range fail to step.
            end: end.unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Expenses inside the window (both ends inclusive) that the budget's
    /// category filter accepts.
    pub fn relevant_expenses<'a>(
        &self,
        budget: &Budget,
        expenses: &'a [Expense],
        window: &BudgetWindow,
    ) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|e| {
                let at = midnight(e.date);
                at >= window.start && at <= window.end && budget.covers(e.category)
            })
            .collect()
    }

    /// Compute spend, remaining balance, percentage, days left, daily
    /// allowance and the linear end-of-window projection.
    ///
    /// Errors with [`CoreError::InvalidBudgetAmount`] for a non-positive limit
    /// and [`CoreError::DegenerateWindow`] when the window spans no time.
    pub fn compute_progress(
        &self,
        budget: &Budget,
        expenses: &[Expense],
        now: DateTime<Utc>,
    ) -> Result<BudgetProgress, CoreError> {
        if !budget.amount.is_finite() || budget.amount <= 0.0 {
            return Err(CoreError::InvalidBudgetAmount(budget.amount));
        }

        let window = self.budget_window(budget, now);
        let total_days = ceil_days(window.end - window.start);
        if total_days <= 0 {
            return Err(CoreError::DegenerateWindow {
                budget_id: budget.id.to_string(),
                total_days,
            });
        }

        let spent: f64 = self
            .relevant_expenses(budget, expenses, &window)
            .iter()
            .map(|e| e.amount)
            .sum();

        let days_passed = ceil_days(now - window.start);
        let projected_spending = if days_passed > 0 {
            (spent / days_passed as f64) * total_days as f64
        } else {
            0.0
        };

        let progress = BudgetProgress {
            spent,
            remaining: budget.amount - spent,
            percentage: spent / budget.amount * 100.0,
            is_over_budget: spent > budget.amount,
            days_remaining: ceil_days(window.end - now).max(0),
            daily_budget: budget.amount / total_days as f64,
            projected_spending,
        };
        tracing::debug!(
            budget_id = %budget.id,
            spent = progress.spent,
            percentage = progress.percentage,
            total_days,
            days_passed,
            "budget progress computed"
        );
        Ok(progress)
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the day in UTC.
pub(crate) fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Step `date` forward by whole months, carrying days past the end of the
/// target month into the next one.
fn add_months_rolling(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let first = date.with_day(1)?.checked_add_months(Months::new(months))?;
    first.checked_add_signed(Duration::days(i64::from(date.day0())))
}

/// Whole days in `span`, rounded up (toward positive infinity).
fn ceil_days(span: Duration) -> i64 {
    let millis = span.num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}
