//! Presentation helpers. Calculators never round; output goes through here.

/// `1234567.891` -> `$1,234,567.89`; negatives get a leading minus.
/// NaN and infinities print as `$NaN`, `$inf`, `-$inf`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}{}", sign, symbol, amount.abs());
    }

    let cents = (amount.abs() * 100.0).round();
    let frac = (cents % 100.0) as u32;
    // Float formatting keeps every integer digit, however large
    let digits = format!("{:.0}", ((cents - frac as f64) / 100.0).trunc());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, grouped, frac)
}

/// `5.99` -> `5.99%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(966.4076, "$"), "$966.41");
        assert_eq!(format_currency(1_234_567.891, "$"), "$1,234,567.89");
        assert_eq!(format_currency(100_000.0, "€"), "€100,000.00");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
    }

    #[test]
    fn test_currency_rounds_half_cents_up() {
        assert_eq!(format_currency(0.125, "$"), "$0.13");
        assert_eq!(format_currency(999.999, "$"), "$1,000.00");
    }

    #[test]
    fn test_negative_currency() {
        assert_eq!(format_currency(-42.5, "$"), "-$42.50");
        // Rounds to zero, so no sign
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn test_non_finite_currency_is_not_disguised() {
        assert_eq!(format_currency(f64::NAN, "$"), "$NaN");
        assert_eq!(format_currency(f64::INFINITY, "$"), "$inf");
        assert_eq!(format_currency(f64::NEG_INFINITY, "$"), "-$inf");
    }

    #[test]
    fn test_huge_currency_keeps_all_digits() {
        let formatted = format_currency(1e40, "$");
        assert!(formatted.starts_with("$10,000,000,000,000,000,"), "got {}", formatted);
        assert!(formatted.len() > 50, "got {}", formatted);
        assert_eq!(formatted.matches(',').count(), 13);
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(5.99, 2), "5.99%");
        assert_eq!(format_percent(5.116189, 3), "5.116%");
    }
}
