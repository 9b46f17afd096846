use serde::{Deserialize, Serialize};

/// User-configurable settings, stored inside the wallet file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// ISO currency code used for display (e.g., "VND").
    pub currency: String,

    #[serde(default)]
    pub alerts: AlertSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "VND".to_string(),
            alerts: AlertSettings::default(),
        }
    }
}

/// How budget alerts are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub dedup: AlertDedup,

    /// Emit `exceeded` only when `percentage >= 100` and the budget is NOT over
    /// (`spent <= amount`), so it fires at exactly 100% and anything above falls
    /// through to `approaching`. Turning it off emits `exceeded` for any
    /// `percentage >= 100`.
    pub legacy_exceeded_guard: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            dedup: AlertDedup::Append,
            legacy_exceeded_guard: true,
        }
    }
}

/// What happens when an evaluation emits an alert that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertDedup {
    /// Every evaluation appends fresh alerts, duplicates included.
    Append,
    /// One alert per `(budget_id, threshold)`: re-emission refreshes the
    /// existing record's message and timestamp, keeping its id and read flag.
    UpsertByThreshold,
}
