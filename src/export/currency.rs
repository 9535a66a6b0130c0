//! Display formatting for yen amounts, hours and percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as whole yen with thousands separators.
///
/// # Examples
///
/// ```
/// use shift_pay::export::format_yen;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_yen(Decimal::from(233_100)), "¥233,100");
/// assert_eq!(format_yen(Decimal::from_str("1281.5").unwrap()), "¥1,282");
/// assert_eq!(format_yen(Decimal::ZERO), "¥0");
/// ```
pub fn format_yen(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if whole.is_sign_negative() && !whole.is_zero() {
        format!("¥-{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}

/// Formats a value with a fixed number of decimal places.
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Formats hours with one decimal place, e.g. `"10.0"`.
pub fn format_hours(hours: Decimal) -> String {
    format_fixed(hours, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_yen(dec("999")), "¥999");
        assert_eq!(format_yen(dec("1000")), "¥1,000");
        assert_eq!(format_yen(dec("15750")), "¥15,750");
        assert_eq!(format_yen(dec("2797200")), "¥2,797,200");
        assert_eq!(format_yen(dec("123456789")), "¥123,456,789");
    }

    #[test]
    fn test_rounds_to_whole_yen() {
        assert_eq!(format_yen(dec("12781.25")), "¥12,781");
        assert_eq!(format_yen(dec("12781.5")), "¥12,782");
        assert_eq!(format_yen(dec("0.4")), "¥0");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_yen(dec("-1234")), "¥-1,234");
        assert_eq!(format_yen(dec("-0.2")), "¥0");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(dec("10")), "10.0");
        assert_eq!(format_hours(dec("7.6666666")), "7.7");
        assert_eq!(format_hours(dec("0.25")), "0.3");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(dec("1.77"), 2), "1.77");
        assert_eq!(format_fixed(dec("77.7"), 1), "77.7");
        assert_eq!(format_fixed(dec("5.125"), 2), "5.13");
    }
}
