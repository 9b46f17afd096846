pub mod clock;
pub mod errors;
pub mod format;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use uuid::Uuid;

use clock::{Clock, SystemClock};
use errors::CoreError;
use models::{
    alert::BudgetAlert,
    analysis::ExpenseAnalysis,
    budget::{Budget, BudgetPeriod, BudgetUpdate},
    expense::{Expense, ExpenseCategory, ExpenseUpdate},
    progress::BudgetProgress,
    report::BudgetReport,
    settings::{AlertDedup, Settings},
    statistics::{MonthTotal, MonthlySummary},
    wallet_data::WalletData,
};
use services::{
    alert_service::AlertService, analysis_service::AnalysisService,
    budget_service::BudgetService, expense_service::ExpenseService,
    report_service::ReportService, statistics_service::StatisticsService,
};
use storage::{export::UserDataExport, manager::StorageManager};

/// Main entry point for the Ví Của Tui core library.
/// Holds the wallet state, the clock, and the services that operate on it.
#[must_use]
pub struct Wallet {
    data: WalletData,
    clock: Box<dyn Clock>,
    expense_service: ExpenseService,
    budget_service: BudgetService,
    alert_service: AlertService,
    report_service: ReportService,
    analysis_service: AnalysisService,
    statistics_service: StatisticsService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("expenses", &self.data.expenses.len())
            .field("budgets", &self.data.budgets.len())
            .field("alerts", &self.data.alerts.len())
            .field("settings", &self.data.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Wallet {
    /// Create an empty wallet on the system clock.
    pub fn create_new() -> Self {
        Self::build(WalletData::default(), Box::new(SystemClock))
    }

    /// Create an empty wallet reading "now" from `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self::build(WalletData::default(), clock)
    }

    /// Wrap existing data (e.g., decoded elsewhere).
    pub fn from_data(data: WalletData, clock: Box<dyn Clock>) -> Self {
        Self::build(data, clock)
    }

    /// Load a wallet from encrypted bytes.
    pub fn load_from_bytes(encrypted: &[u8], password: &str, clock: Box<dyn Clock>) -> Result<Self, CoreError> {
        let data = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(data, clock))
    }

    /// Save the wallet to encrypted bytes. Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.data, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(
        path: impl AsRef<std::path::Path>,
        password: &str,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let data = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(data, clock))
    }

    /// Save to an encrypted file on disk (native only).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.data, path, password)?;
        self.dirty = false;
        Ok(())
    }

    /// Raw access to everything the wallet holds.
    #[must_use]
    pub fn data(&self) -> &WalletData {
        &self.data
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Log an expense for `user_id`. Rejects negative amounts.
    pub fn add_expense(
        &mut self,
        user_id: &str,
        amount: f64,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let expense = Expense::new(user_id, amount, category, description, date, self.clock.now())?;
        let id = self.expense_service.add_expense(&mut self.data.expenses, expense)?;
        self.dirty = true;
        Ok(id)
    }

    /// Apply a partial update to an expense.
    pub fn update_expense(&mut self, expense_id: Uuid, update: ExpenseUpdate) -> Result<Expense, CoreError> {
        let updated = self
            .expense_service
            .update_expense(&mut self.data.expenses, expense_id, update)?;
        self.dirty = true;
        Ok(updated)
    }

    /// Returns `false` if no expense has that id.
    pub fn remove_expense(&mut self, expense_id: Uuid) -> Result<bool, CoreError> {
        let removed = self
            .expense_service
            .remove_expense(&mut self.data.expenses, expense_id)?;
        self.dirty |= removed;
        Ok(removed)
    }

    /// A user's expenses, newest first.
    pub fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>, CoreError> {
        self.expense_service.expenses_for_user(&self.data.expenses, user_id)
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Create an active budget for `user_id`. Rejects a non-positive amount.
    pub fn add_budget(
        &mut self,
        user_id: &str,
        name: impl Into<String>,
        amount: f64,
        period: BudgetPeriod,
        categories: Vec<ExpenseCategory>,
        start_date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let budget = Budget::new(user_id, name, amount, period, categories, start_date, self.clock.now())?;
        self.insert_budget(budget)
    }

    /// Store a budget built by the caller (e.g., a custom period with an end date).
    pub fn insert_budget(&mut self, budget: Budget) -> Result<Uuid, CoreError> {
        let id = self.budget_service.add_budget(&mut self.data.budgets, budget)?;
        self.dirty = true;
        Ok(id)
    }

    /// Apply a partial update to a budget.
    pub fn update_budget(&mut self, budget_id: Uuid, update: BudgetUpdate) -> Result<Budget, CoreError> {
        let updated = self
            .budget_service
            .update_budget(&mut self.data.budgets, budget_id, update)?;
        self.dirty = true;
        Ok(updated)
    }

    /// Delete a budget and its alerts. Returns `false` if no budget has that id.
    pub fn delete_budget(&mut self, budget_id: Uuid) -> Result<bool, CoreError> {
        let deleted = self
            .budget_service
            .delete_budget(&mut self.data.budgets, &mut self.data.alerts, budget_id)?;
        self.dirty |= deleted;
        Ok(deleted)
    }

    /// A user's budgets, in creation order.
    pub fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>, CoreError> {
        self.budget_service.budgets_for_user(&self.data.budgets, user_id)
    }

    #[must_use]
    pub fn get_budget(&self, budget_id: Uuid) -> Option<&Budget> {
        self.data.budgets.iter().find(|b| b.id == budget_id)
    }

    /// Progress of one budget against its owner's expenses, as of now.
    pub fn budget_progress(&self, budget_id: Uuid) -> Result<BudgetProgress, CoreError> {
        let budget = self.require_budget(budget_id)?;
        let expenses = self.owned_expenses(&budget.user_id);
        self.budget_service
            .compute_progress(budget, &expenses, self.clock.now())
    }

    /// Full report for one budget, as of now.
    pub fn budget_report(&self, budget_id: Uuid) -> Result<BudgetReport, CoreError> {
        let budget = self.require_budget(budget_id)?;
        let expenses = self.owned_expenses(&budget.user_id);
        self.report_service
            .generate_budget_report(budget, &expenses, self.clock.now())
    }

    // ── Alerts ──────────────────────────────────────────────────────

    /// Evaluate the user's active budgets and record any threshold alerts.
    /// Returns the alerts emitted by this pass.
    pub fn check_budget_alerts(&mut self, user_id: &str) -> Result<Vec<BudgetAlert>, CoreError> {
        let expenses = self.owned_expenses(user_id);
        let settings = self.data.settings.alerts;
        let emitted = self.alert_service.check_budget_alerts(
            &mut self.data.alerts,
            user_id,
            &self.data.budgets,
            &expenses,
            self.clock.now(),
            &settings,
        )?;
        if !emitted.is_empty() {
            self.dirty = true;
        }
        Ok(emitted)
    }

    /// A user's alerts, oldest first.
    pub fn get_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>, CoreError> {
        self.alert_service.alerts_for_user(&self.data.alerts, user_id)
    }

    /// Number of unread alerts for `user_id`.
    #[must_use]
    pub fn unread_alert_count(&self, user_id: &str) -> usize {
        self.data
            .alerts
            .iter()
            .filter(|a| a.user_id == user_id && !a.is_read)
            .count()
    }

    /// Returns `false` if no alert has that id.
    pub fn mark_alert_as_read(&mut self, alert_id: Uuid) -> Result<bool, CoreError> {
        let found = self
            .alert_service
            .mark_alert_as_read(&mut self.data.alerts, alert_id)?;
        self.dirty |= found;
        Ok(found)
    }

    /// Drop the user's read alerts. Returns how many were removed.
    pub fn clear_read_alerts(&mut self, user_id: &str) -> Result<usize, CoreError> {
        let removed = self
            .alert_service
            .clear_read_alerts(&mut self.data.alerts, user_id)?;
        if removed > 0 {
            self.dirty = true;
        }
        Ok(removed)
    }

    // ── Analysis ────────────────────────────────────────────────────

    #[must_use]
    pub fn analyze_expenses(&self, user_id: &str) -> ExpenseAnalysis {
        let expenses = self.owned_expenses(user_id);
        self.analysis_service.analyze_expenses(&expenses)
    }

    /// This month against last month, with top categories and latest records.
    #[must_use]
    pub fn monthly_summary(&self, user_id: &str) -> MonthlySummary {
        let expenses = self.owned_expenses(user_id);
        self.statistics_service.monthly_summary(&expenses, self.clock.now())
    }

    /// Per-month totals for the last `months` months, oldest first.
    #[must_use]
    pub fn monthly_trend(&self, user_id: &str, months: u32) -> Vec<MonthTotal> {
        let expenses = self.owned_expenses(user_id);
        self.statistics_service
            .monthly_trend(&expenses, self.clock.now(), months)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.data.settings
    }

    /// Set the display currency. Must be exactly 3 ASCII letters.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., VND, USD)"
            )));
        }
        self.data.settings.currency = code;
        self.dirty = true;
        Ok(())
    }

    pub fn set_alert_dedup(&mut self, dedup: AlertDedup) {
        self.data.settings.alerts.dedup = dedup;
        self.dirty = true;
    }

    pub fn set_legacy_exceeded_guard(&mut self, enabled: bool) {
        self.data.settings.alerts.legacy_exceeded_guard = enabled;
        self.dirty = true;
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Plain-JSON snapshot of one user's data.
    pub fn export_user_data(&self, user_id: &str) -> Result<String, CoreError> {
        UserDataExport::collect(&self.data, user_id, self.clock.now()).to_json()
    }

    /// Replace a user's expenses and budgets with those in an export.
    pub fn import_user_data(&mut self, user_id: &str, json: &str) -> Result<(), CoreError> {
        let export = UserDataExport::from_json(json)?;
        tracing::info!(
            user_id,
            expenses = export.expenses.len(),
            budgets = export.budgets.len(),
            "importing user data"
        );
        export.apply_to(&mut self.data, user_id)?;
        self.dirty = true;
        Ok(())
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the wallet has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(data: WalletData, clock: Box<dyn Clock>) -> Self {
        Self {
            data,
            clock,
            expense_service: ExpenseService::new(),
            budget_service: BudgetService::new(),
            alert_service: AlertService::new(),
            report_service: ReportService::new(),
            analysis_service: AnalysisService::new(),
            statistics_service: StatisticsService::new(),
            dirty: false,
        }
    }

    fn require_budget(&self, budget_id: Uuid) -> Result<&Budget, CoreError> {
        self.get_budget(budget_id)
            .ok_or_else(|| CoreError::BudgetNotFound(budget_id.to_string()))
    }

    fn owned_expenses(&self, user_id: &str) -> Vec<Expense> {
        self.data
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect()
    }
}
