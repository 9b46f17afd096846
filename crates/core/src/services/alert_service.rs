use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::format::format_percent;
use crate::models::alert::{AlertType, BudgetAlert};
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::progress::BudgetProgress;
use crate::models::settings::{AlertDedup, AlertSettings};
use crate::services::budget_service::BudgetService;
use crate::storage::repository::Repository;

/// Turns budget progress into threshold alerts and manages the alert store.
pub struct AlertService {
    budget_service: BudgetService,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            budget_service: BudgetService::new(),
        }
    }

    /// Pick at most one tier for a progress snapshot, highest first.
    ///
    /// With `legacy_exceeded_guard` the `exceeded` tier additionally requires
    /// `!is_over_budget`, so only exactly 100% qualifies and anything above
    /// is reported as `approaching`.
    pub fn classify(&self, progress: &BudgetProgress, settings: &AlertSettings) -> Option<AlertType> {
        let exceeded = progress.percentage >= 100.0
            && (!settings.legacy_exceeded_guard || !progress.is_over_budget);
        if exceeded {
            Some(AlertType::Exceeded)
        } else if progress.percentage >= 90.0 {
            Some(AlertType::Approaching)
        } else if progress.percentage >= 75.0 {
            Some(AlertType::Warning)
        } else {
            None
        }
    }

    /// Evaluate every active budget owned by `user_id` and build the alerts
    /// it qualifies for. Nothing is persisted.
    ///
    /// Never fails: a budget whose progress cannot be computed is skipped
    /// with a warning.
    pub fn evaluate_alerts(
        &self,
        user_id: &str,
        budgets: &[Budget],
        expenses: &[Expense],
        now: DateTime<Utc>,
        settings: &AlertSettings,
    ) -> Vec<BudgetAlert> {
        let mut alerts = Vec::new();

        for budget in budgets.iter().filter(|b| b.user_id == user_id && b.is_active) {
            let progress = match self.budget_service.compute_progress(budget, expenses, now) {
                Ok(progress) => progress,
                Err(e) => {
                    tracing::warn!(budget_id = %budget.id, error = %e, "skipping budget in alert evaluation");
                    continue;
                }
            };

            if let Some(alert_type) = self.classify(&progress, settings) {
                let message = alert_message(alert_type, &budget.name, progress.percentage);
                alerts.push(BudgetAlert::new(budget.id, user_id, alert_type, message, now));
            }
        }

        alerts
    }

    /// Evaluate and persist. Returns the alerts emitted by this pass.
    ///
    /// With [`AlertDedup::Append`] new alerts are appended as-is, so running
    /// twice over an unchanged budget stores two alerts. With
    /// [`AlertDedup::UpsertByThreshold`] an existing alert for the same
    /// `(budget_id, threshold)` is refreshed in place instead.
    pub fn check_budget_alerts<R: Repository<BudgetAlert>>(
        &self,
        store: &mut R,
        user_id: &str,
        budgets: &[Budget],
        expenses: &[Expense],
        now: DateTime<Utc>,
        settings: &AlertSettings,
    ) -> Result<Vec<BudgetAlert>, CoreError> {
        let alerts = self.evaluate_alerts(user_id, budgets, expenses, now, settings);
        if alerts.is_empty() {
            return Ok(alerts);
        }

        match settings.dedup {
            AlertDedup::Append => store.append(alerts.clone())?,
            AlertDedup::UpsertByThreshold => {
                let mut all = store.list()?;
                for alert in &alerts {
                    match all
                        .iter_mut()
                        .find(|a| a.budget_id == alert.budget_id && a.threshold == alert.threshold)
                    {
                        Some(existing) => {
                            existing.message = alert.message.clone();
                            existing.created_at = alert.created_at;
                        }
                        None => all.push(alert.clone()),
                    }
                }
                store.replace(all)?;
            }
        }

        tracing::debug!(user_id, emitted = alerts.len(), dedup = ?settings.dedup, "budget alerts recorded");
        Ok(alerts)
    }

    /// Alerts belonging to `user_id`, oldest first.
    pub fn alerts_for_user<R: Repository<BudgetAlert>>(
        &self,
        store: &R,
        user_id: &str,
    ) -> Result<Vec<BudgetAlert>, CoreError> {
        Ok(store.list()?.into_iter().filter(|a| a.user_id == user_id).collect())
    }

    /// Mark one alert as read. Returns `false` if no alert has that id.
    pub fn mark_alert_as_read<R: Repository<BudgetAlert>>(
        &self,
        store: &mut R,
        alert_id: Uuid,
    ) -> Result<bool, CoreError> {
        let mut all = store.list()?;
        match all.iter_mut().find(|a| a.id == alert_id) {
            Some(alert) => alert.is_read = true,
            None => return Ok(false),
        }
        store.replace(all)?;
        Ok(true)
    }

    /// Drop `user_id`'s read alerts. Returns how many were removed.
    pub fn clear_read_alerts<R: Repository<BudgetAlert>>(
        &self,
        store: &mut R,
        user_id: &str,
    ) -> Result<usize, CoreError> {
        let mut all = store.list()?;
        let before = all.len();
        all.retain(|a| a.user_id != user_id || !a.is_read);
        let removed = before - all.len();
        if removed > 0 {
            store.replace(all)?;
        }
        Ok(removed)
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-rendered (Vietnamese) alert text.
fn alert_message(alert_type: AlertType, budget_name: &str, percentage: f64) -> String {
    match alert_type {
        AlertType::Exceeded => format!(
            "Bạn đã vượt quá ngân sách \"{budget_name}\" với {}%",
            format_percent(percentage - 100.0)
        ),
        AlertType::Approaching => format!(
            "Bạn đã sử dụng {}% ngân sách \"{budget_name}\"",
            format_percent(percentage)
        ),
        AlertType::Warning => format!(
            "Cảnh báo: Bạn đã sử dụng {}% ngân sách \"{budget_name}\"",
            format_percent(percentage)
        ),
    }
}
