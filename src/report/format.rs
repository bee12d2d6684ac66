//! User-facing number formatting.

use crate::data::BoxStats;

/// Format a prediction exactly as the result area shows it.
pub fn format_price(price: f64) -> String {
    format!("Predicted Price: Rs {}", format_currency(price))
}

/// Render a currency amount with two decimal places and thousands grouping.
///
/// Purely presentational; the locale prefix is handled by the caller.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// One-line five-number summary for the price boxplot panel.
pub fn format_five_number(stats: &BoxStats) -> String {
    format!(
        "min={} | q1={} | med={} | q3={} | max={}",
        format_currency(stats.min),
        format_currency(stats.q1),
        format_currency(stats.median),
        format_currency(stats.q3),
        format_currency(stats.max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.5), "999.50");
        assert_eq!(format_currency(1000.0), "1,000.00");
        assert_eq!(format_currency(4_500_000.0), "4,500,000.00");
        assert_eq!(format_currency(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn currency_keeps_the_sign_outside_the_grouping() {
        assert_eq!(format_currency(-1234.5), "-1,234.50");
    }

    #[test]
    fn price_line_matches_result_area_copy() {
        assert_eq!(
            format_price(4_500_000.0),
            "Predicted Price: Rs 4,500,000.00"
        );
    }
}
