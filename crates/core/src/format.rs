use num_format::{Locale, ToFormattedString as _};

/// Render an amount in whole đồng with Vietnamese digit grouping (`1.500.000`).
pub fn format_vnd(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    (amount.round() as i64).to_formatted_string(&Locale::vi)
}

/// Render a percentage with one decimal place (`87.5`).
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_vnd(1_500_000.0), "1.500.000");
        assert_eq!(format_vnd(999.0), "999");
    }

    #[test]
    fn rounds_to_whole_dong() {
        assert_eq!(format_vnd(33_333.6), "33.334");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_vnd(-2_000.0), "-2.000");
    }

    #[test]
    fn non_finite_renders_zero() {
        assert_eq!(format_vnd(f64::NAN), "0");
        assert_eq!(format_vnd(f64::INFINITY), "0");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(87.456), "87.5");
        assert_eq!(format_percent(100.0), "100.0");
    }
}
