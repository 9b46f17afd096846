use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::settings::Settings;
use crate::models::Validate;
use crate::models::wallet_data::WalletData;

/// Version tag written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Plain-JSON dump of one user's data, for backup or moving between devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataExport {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub user_id: String,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl UserDataExport {
    /// Snapshot everything `user_id` owns.
    pub fn collect(data: &WalletData, user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            export_date: now,
            user_id: user_id.to_string(),
            settings: Some(data.settings.clone()),
            expenses: data
                .expenses
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect(),
            budgets: data
                .budgets
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to encode export: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let export: Self = serde_json::from_str(json)?;
        if export.version != EXPORT_VERSION {
            return Err(CoreError::InvalidFileFormat(format!(
                "Unsupported export version '{}' (expected {EXPORT_VERSION})",
                export.version
            )));
        }
        export.validate()?;
        Ok(export)
    }

    /// Every imported record must satisfy the same amount rules as a
    /// freshly created one.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.expenses.validate()?;
        self.budgets.validate()
    }

    /// Replace `user_id`'s expenses and budgets with the exported ones.
    ///
    /// Imported records are re-owned by `user_id`. Other users' records are
    /// untouched. Alerts of replaced budgets are dropped. Nothing changes
    /// when a record fails validation.
    pub fn apply_to(self, data: &mut WalletData, user_id: &str) -> Result<(), CoreError> {
        self.validate()?;

        if let Some(settings) = self.settings {
            data.settings = settings;
        }

        data.expenses.retain(|e| e.user_id != user_id);
        data.expenses.extend(self.expenses.into_iter().map(|mut e| {
            e.user_id = user_id.to_string();
            e
        }));

        data.budgets.retain(|b| b.user_id != user_id);
        data.alerts.retain(|a| a.user_id != user_id);
        data.budgets.extend(self.budgets.into_iter().map(|mut b| {
            b.user_id = user_id.to_string();
            b
        }));
        Ok(())
    }
}
