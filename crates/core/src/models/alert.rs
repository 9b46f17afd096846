use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Validate;
use crate::errors::CoreError;

/// Threshold tier of a budget alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// 75% of the budget used
    Warning,
    /// 90% of the budget used
    Approaching,
    /// 100% of the budget used
    Exceeded,
}

impl AlertType {
    /// Percentage that triggers this tier.
    pub fn threshold(&self) -> u8 {
        match self {
            AlertType::Warning => 75,
            AlertType::Approaching => 90,
            AlertType::Exceeded => 100,
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Warning => write!(f, "warning"),
            AlertType::Approaching => write!(f, "approaching"),
            AlertType::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Notification raised when a budget crosses a threshold tier.
/// The message is pre-rendered; there is no separate localization layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub user_id: String,
    pub alert_type: AlertType,
    /// 75, 90 or 100
    pub threshold: u8,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl BudgetAlert {
    pub fn new(
        budget_id: Uuid,
        user_id: impl Into<String>,
        alert_type: AlertType,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            user_id: user_id.into(),
            alert_type,
            threshold: alert_type.threshold(),
            message: message.into(),
            is_read: false,
            created_at,
        }
    }
}

impl Validate for BudgetAlert {
    /// The stored threshold must match the tier.
    fn validate(&self) -> Result<(), CoreError> {
        if self.threshold != self.alert_type.threshold() {
            return Err(CoreError::ValidationError(format!(
                "Alert {} has threshold {} for tier {}",
                self.id, self.threshold, self.alert_type
            )));
        }
        Ok(())
    }
}
