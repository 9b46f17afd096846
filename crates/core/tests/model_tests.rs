use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use vicuatui_core::errors::CoreError;
use vicuatui_core::models::alert::{AlertType, BudgetAlert};
use vicuatui_core::models::budget::{Budget, BudgetPeriod, BudgetUpdate};
use vicuatui_core::models::expense::{Expense, ExpenseCategory, ExpenseUpdate};
use vicuatui_core::models::settings::{AlertDedup, AlertSettings, Settings};
use vicuatui_core::models::wallet_data::WalletData;
use vicuatui_core::models::Validate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, 8, 0, 0).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  ExpenseCategory
// ═══════════════════════════════════════════════════════════════════

mod expense_category {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ExpenseCategory::Transportation).unwrap();
        assert_eq!(json, "\"transportation\"");
        let back: ExpenseCategory = serde_json::from_str("\"healthcare\"").unwrap();
        assert_eq!(back, ExpenseCategory::Healthcare);
    }

    #[test]
    fn display_matches_serialized_name() {
        for category in ExpenseCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
    }

    #[test]
    fn vietnamese_labels() {
        assert_eq!(ExpenseCategory::Food.label(), "Ăn uống");
        assert_eq!(ExpenseCategory::Savings.label(), "Tiết kiệm");
        assert_eq!(ExpenseCategory::Other.label(), "Khác");
    }

    #[test]
    fn all_lists_eight_distinct_categories() {
        let set: std::collections::HashSet<_> = ExpenseCategory::ALL.iter().collect();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(serde_json::from_str::<ExpenseCategory>("\"travel\"").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Expense
// ═══════════════════════════════════════════════════════════════════

mod expense {
    use super::*;

    #[test]
    fn new_keeps_fields_and_generates_id() {
        let e = Expense::new("u1", 45_000.0, ExpenseCategory::Food, "Phở", d(2026, 9, 3), at(2026, 9, 3)).unwrap();
        assert_eq!(e.user_id, "u1");
        assert_eq!(e.amount, 45_000.0);
        assert_eq!(e.description, "Phở");
        assert_eq!(e.date, d(2026, 9, 3));
        assert!(!e.id.is_nil());
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(Expense::new("u1", 0.0, ExpenseCategory::Other, "", d(2026, 1, 1), at(2026, 1, 1)).is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = Expense::new("u1", -1.0, ExpenseCategory::Other, "", d(2026, 1, 1), at(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidExpenseAmount(a) if a == -1.0));
    }

    #[test]
    fn nan_amount_is_rejected() {
        assert!(Expense::new("u1", f64::NAN, ExpenseCategory::Other, "", d(2026, 1, 1), at(2026, 1, 1)).is_err());
    }

    #[test]
    fn ids_are_unique() {
        let a = Expense::new("u1", 1.0, ExpenseCategory::Food, "", d(2026, 1, 1), at(2026, 1, 1)).unwrap();
        let b = Expense::new("u1", 1.0, ExpenseCategory::Food, "", d(2026, 1, 1), at(2026, 1, 1)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_partial_update() {
        let mut e = Expense::new("u1", 10.0, ExpenseCategory::Food, "a", d(2026, 1, 1), at(2026, 1, 1)).unwrap();
        e.apply(ExpenseUpdate {
            amount: Some(20.0),
            description: Some("b".into()),
            ..ExpenseUpdate::default()
        })
        .unwrap();
        assert_eq!(e.amount, 20.0);
        assert_eq!(e.description, "b");
        assert_eq!(e.category, ExpenseCategory::Food);
    }

    #[test]
    fn apply_rejects_negative_amount_without_changes() {
        let mut e = Expense::new("u1", 10.0, ExpenseCategory::Food, "a", d(2026, 1, 1), at(2026, 1, 1)).unwrap();
        let result = e.apply(ExpenseUpdate {
            amount: Some(-5.0),
            description: Some("changed".into()),
            ..ExpenseUpdate::default()
        });
        assert!(result.is_err());
        assert_eq!(e.amount, 10.0);
        assert_eq!(e.description, "a");
    }

    #[test]
    fn description_defaults_when_missing_in_json() {
        let e = Expense::new("u1", 10.0, ExpenseCategory::Food, "x", d(2026, 1, 1), at(2026, 1, 1)).unwrap();
        let mut value = serde_json::to_value(&e).unwrap();
        value.as_object_mut().unwrap().remove("description");
        let back: Expense = serde_json::from_value(value).unwrap();
        assert_eq!(back.description, "");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Budget
// ═══════════════════════════════════════════════════════════════════

mod budget {
    use super::*;

    fn monthly() -> Budget {
        Budget::new("u1", "Tháng 9", 3_000_000.0, BudgetPeriod::Monthly, vec![], d(2026, 9, 1), at(2026, 9, 1)).unwrap()
    }

    #[test]
    fn new_budget_is_active_without_end_date() {
        let b = monthly();
        assert!(b.is_active);
        assert_eq!(b.end_date, None);
        assert_eq!(b.period, BudgetPeriod::Monthly);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = Budget::new("u1", "x", 0.0, BudgetPeriod::Weekly, vec![], d(2026, 1, 1), at(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBudgetAmount(a) if a == 0.0));
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(Budget::new("u1", "x", -10.0, BudgetPeriod::Weekly, vec![], d(2026, 1, 1), at(2026, 1, 1)).is_err());
    }

    #[test]
    fn empty_categories_cover_everything() {
        let b = monthly();
        for category in ExpenseCategory::ALL {
            assert!(b.covers(category));
        }
    }

    #[test]
    fn category_filter_restricts_coverage() {
        let b = Budget::new(
            "u1",
            "Ăn uống",
            1_000_000.0,
            BudgetPeriod::Monthly,
            vec![ExpenseCategory::Food],
            d(2026, 9, 1),
            at(2026, 9, 1),
        )
        .unwrap();
        assert!(b.covers(ExpenseCategory::Food));
        assert!(!b.covers(ExpenseCategory::Shopping));
    }

    #[test]
    fn duplicate_categories_are_collapsed() {
        let b = Budget::new(
            "u1",
            "x",
            1.0,
            BudgetPeriod::Weekly,
            vec![ExpenseCategory::Food, ExpenseCategory::Food, ExpenseCategory::Other],
            d(2026, 1, 1),
            at(2026, 1, 1),
        )
        .unwrap();
        assert_eq!(b.categories, vec![ExpenseCategory::Food, ExpenseCategory::Other]);
    }

    #[test]
    fn with_end_date_sets_override() {
        let b = monthly().with_end_date(d(2026, 12, 31));
        assert_eq!(b.end_date, Some(d(2026, 12, 31)));
    }

    #[test]
    fn apply_update_and_clear_end_date() {
        let mut b = monthly().with_end_date(d(2026, 12, 31));
        b.apply(BudgetUpdate {
            name: Some("Mới".into()),
            is_active: Some(false),
            end_date: Some(None),
            ..BudgetUpdate::default()
        })
        .unwrap();
        assert_eq!(b.name, "Mới");
        assert!(!b.is_active);
        assert_eq!(b.end_date, None);
    }

    #[test]
    fn apply_rejects_non_positive_amount() {
        let mut b = monthly();
        assert!(b
            .apply(BudgetUpdate {
                amount: Some(0.0),
                ..BudgetUpdate::default()
            })
            .is_err());
        assert_eq!(b.amount, 3_000_000.0);
    }

    #[test]
    fn period_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BudgetPeriod::Yearly).unwrap(), "\"yearly\"");
    }

    #[test]
    fn unknown_period_falls_back_to_custom() {
        let p: BudgetPeriod = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(p, BudgetPeriod::Custom);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Alerts & Settings
// ═══════════════════════════════════════════════════════════════════

mod alert {
    use super::*;

    #[test]
    fn thresholds_per_tier() {
        assert_eq!(AlertType::Warning.threshold(), 75);
        assert_eq!(AlertType::Approaching.threshold(), 90);
        assert_eq!(AlertType::Exceeded.threshold(), 100);
    }

    #[test]
    fn new_alert_is_unread_and_carries_threshold() {
        let budget_id = uuid::Uuid::new_v4();
        let a = BudgetAlert::new(budget_id, "u1", AlertType::Approaching, "msg", at(2026, 9, 20));
        assert_eq!(a.budget_id, budget_id);
        assert_eq!(a.threshold, 90);
        assert!(!a.is_read);
        assert_eq!(a.message, "msg");
    }

    #[test]
    fn alert_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AlertType::Exceeded).unwrap(), "\"exceeded\"");
        assert_eq!(AlertType::Warning.to_string(), "warning");
    }

    #[test]
    fn threshold_out_of_step_with_tier_fails_validation() {
        let mut a = BudgetAlert::new(uuid::Uuid::new_v4(), "u1", AlertType::Warning, "msg", at(2026, 9, 20));
        assert!(a.validate().is_ok());
        a.threshold = 90;
        assert!(matches!(a.validate(), Err(CoreError::ValidationError(_))));
    }
}

mod validation {
    use super::*;

    #[test]
    fn wallet_data_checks_every_record() {
        let mut data = WalletData::default();
        data.expenses
            .push(Expense::new("u1", 10.0, ExpenseCategory::Food, "", d(2026, 9, 1), at(2026, 9, 1)).unwrap());
        assert!(data.validate().is_ok());

        data.expenses[0].amount = f64::NAN;
        assert!(matches!(data.validate(), Err(CoreError::InvalidExpenseAmount(_))));
    }
}

mod settings {
    use super::*;

    #[test]
    fn defaults_preserve_shipped_alert_behavior() {
        let s = Settings::default();
        assert_eq!(s.currency, "VND");
        assert_eq!(s.alerts.dedup, AlertDedup::Append);
        assert!(s.alerts.legacy_exceeded_guard);
    }

    #[test]
    fn alert_settings_default_when_missing() {
        let s: Settings = serde_json::from_str(r#"{"currency":"USD"}"#).unwrap();
        assert_eq!(s.currency, "USD");
        assert_eq!(s.alerts, AlertSettings::default());
    }

    #[test]
    fn empty_wallet_data() {
        let w = WalletData::default();
        assert!(w.expenses.is_empty());
        assert!(w.budgets.is_empty());
        assert!(w.alerts.is_empty());
        assert_eq!(w.settings, Settings::default());
    }
}
