//! Arabic-Indic rendering of numbers and money amounts.
//!
//! Every function here is total: missing, non-finite or out-of-range input
//! degrades to a zero rendering instead of failing.

use std::fmt::Display;

use crate::constants::{
    group_thousands, ARABIC_DIGITS, CURRENCY_SUFFIX, DECIMAL_SEPARATOR, MAX_FORMATTED_AMOUNT,
    ZERO_CURRENCY, ZERO_NUMBER,
};

/// Replaces every Western digit in the rendered value with its Arabic-Indic
/// counterpart. Signs, points and any other characters are kept as they are.
pub fn to_arabic_digits(value: impl Display) -> String {
    value.to_string().chars().map(arabic_digit).collect()
}

/// Like [`to_arabic_digits`], rendering a missing value as "٠".
pub fn to_arabic_digits_or_zero<T: Display>(value: Option<T>) -> String {
    match value {
        Some(value) => to_arabic_digits(value),
        None => ZERO_NUMBER.to_string(),
    }
}

/// Renders an amount with two decimals, Arabic grouping and the pound suffix,
/// e.g. `1234.5` becomes "١٬٢٣٤٫٥٠ ج.م".
///
/// Cents come from the exact binary value, so `2.675` (stored as `2.67499…`)
/// renders "٢٫٦٧". Exact ties such as `0.125` round away from zero. Amounts
/// at or beyond `MAX_FORMATTED_AMOUNT` render like a missing value.
pub fn format_currency_arabic(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|value| in_formatting_range(*value)) else {
        return ZERO_CURRENCY.to_string();
    };

    let fixed = fixed_two_decimals(amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole: i128 = whole.parse().unwrap_or_default();
    let sign = if amount < 0.0 && (whole > 0 || fraction != "00") {
        "-"
    } else {
        ""
    };

    format!(
        "{sign}{}{DECIMAL_SEPARATOR}{}{CURRENCY_SUFFIX}",
        to_arabic_digits(group_thousands(whole)),
        to_arabic_digits(fraction)
    )
}

/// Renders a count or quantity as a grouped Arabic integer with no suffix.
/// Values outside `MAX_FORMATTED_AMOUNT` render like a missing value.
pub fn format_number_arabic(number: Option<f64>) -> String {
    let Some(number) = number.filter(|value| in_formatting_range(*value)) else {
        return ZERO_NUMBER.to_string();
    };

    to_arabic_digits(group_thousands(round_half_up(number) as i128))
}

fn in_formatting_range(value: f64) -> bool {
    value.is_finite() && value.abs() < MAX_FORMATTED_AMOUNT
}

// `{:.2}` works on the exact binary value but breaks exact ties to even.
// Those ties are odd multiples of 1/8 and get rounded up here instead.
fn fixed_two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (value * 100.0).ceil();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{value:.2}")
}

fn arabic_digit(c: char) -> char {
    match c.to_digit(10) {
        Some(digit) => ARABIC_DIGITS[digit as usize],
        None => c,
    }
}

// Ties go toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digits_map_to_arabic_indic() {
        for (digit, expected) in ARABIC_DIGITS.iter().enumerate() {
            assert_eq!(to_arabic_digits(digit), expected.to_string());
        }
    }

    #[test]
    fn non_digits_pass_through() {
        assert_eq!(to_arabic_digits("-123.45"), "-١٢٣.٤٥");
        assert_eq!(to_arabic_digits("ORD-2024/07"), "ORD-٢٠٢٤/٠٧");
        assert_eq!(to_arabic_digits(12.5), "١٢.٥");
    }

    #[test]
    fn missing_value_renders_zero() {
        assert_eq!(to_arabic_digits_or_zero::<u32>(None), "٠");
        assert_eq!(to_arabic_digits_or_zero(Some(42)), "٤٢");
    }

    #[test]
    fn currency_falls_back_for_missing_or_nan() {
        assert_eq!(format_currency_arabic(None), "٠٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(f64::NAN)), "٠٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(f64::INFINITY)), "٠٫٠٠ ج.م");
    }

    #[test]
    fn currency_groups_whole_part_and_pads_fraction() {
        assert_eq!(format_currency_arabic(Some(1234.5)), "١٬٢٣٤٫٥٠ ج.م");
        assert_eq!(format_currency_arabic(Some(0.0)), "٠٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(1_000_000.0)), "١٬٠٠٠٬٠٠٠٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(999.999)), "١٬٠٠٠٫٠٠ ج.م");
    }

    #[test]
    fn currency_keeps_minus_sign() {
        assert_eq!(format_currency_arabic(Some(-1234.5)), "-١٬٢٣٤٫٥٠ ج.م");
        assert_eq!(format_currency_arabic(Some(-0.25)), "-٠٫٢٥ ج.م");
    }

    #[test]
    fn currency_total_of_order_amounts() {
        let total: f64 = [100.0, 250.75, 0.0].iter().sum();
        assert_eq!(format_currency_arabic(Some(total)), "٣٥٠٫٧٥ ج.م");
    }

    #[test]
    fn currency_rounds_exact_ties_away_from_zero() {
        assert_eq!(format_currency_arabic(Some(0.125)), "٠٫١٣ ج.م");
        assert_eq!(format_currency_arabic(Some(-0.125)), "-٠٫١٣ ج.م");
        assert_eq!(format_currency_arabic(Some(0.375)), "٠٫٣٨ ج.م");
        assert_eq!(format_currency_arabic(Some(0.625)), "٠٫٦٣ ج.م");
        assert_eq!(format_currency_arabic(Some(1000.875)), "١٬٠٠٠٫٨٨ ج.م");
    }

    #[test]
    fn currency_rounds_the_stored_value_below_a_tie_down() {
        assert_eq!(format_currency_arabic(Some(2.675)), "٢٫٦٧ ج.م");
        assert_eq!(format_currency_arabic(Some(1.115)), "١٫١١ ج.م");
        assert_eq!(format_currency_arabic(Some(1.005)), "١٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(-2.675)), "-٢٫٦٧ ج.م");
    }

    #[test]
    fn negative_amount_rounding_to_zero_is_unsigned() {
        assert_eq!(format_currency_arabic(Some(-0.001)), "٠٫٠٠ ج.م");
    }

    #[test]
    fn amounts_beyond_the_grouping_range_fall_back() {
        assert_eq!(format_currency_arabic(Some(1e37)), "٠٫٠٠ ج.م");
        assert_eq!(format_currency_arabic(Some(-1e40)), "٠٫٠٠ ج.م");
        assert_eq!(format_number_arabic(Some(1e37)), "٠");
        assert_eq!(
            format_currency_arabic(Some(1e15)),
            "١٬٠٠٠٬٠٠٠٬٠٠٠٬٠٠٠٬٠٠٠٫٠٠ ج.م"
        );
    }

    #[test]
    fn number_rounds_then_groups() {
        assert_eq!(format_number_arabic(Some(1234.6)), "١٬٢٣٥");
        assert_eq!(format_number_arabic(Some(1234.4)), "١٬٢٣٤");
        assert_eq!(format_number_arabic(Some(7.0)), "٧");
        assert_eq!(format_number_arabic(Some(2.5)), "٣");
        assert_eq!(format_number_arabic(Some(-2.5)), "-٢");
        assert_eq!(format_number_arabic(Some(-1500.0)), "-١٬٥٠٠");
    }

    #[test]
    fn number_falls_back_for_missing_or_nan() {
        assert_eq!(format_number_arabic(None), "٠");
        assert_eq!(format_number_arabic(Some(f64::NAN)), "٠");
    }
}
