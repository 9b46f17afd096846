pub mod alert_service;
pub mod analysis_service;
pub mod budget_service;
pub mod expense_service;
pub mod report_service;
pub mod statistics_service;
