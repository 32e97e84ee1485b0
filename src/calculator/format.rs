//! Number formatting for the calculator display.
//!
//! Values are formatted with `.` as the decimal separator. The display layer
//! converts to the decimal-comma convention with [`to_display`], and typed
//! entries are read back with [`parse_entry`].

use serde::{Deserialize, Serialize};

/// Significant digits shown in fixed notation.
const SIGNIFICANT_DIGITS: usize = 12;

/// Fractional digits shown in scientific notation.
const SCIENTIFIC_DIGITS: usize = 6;

/// Magnitudes at or above this switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e12;

/// Magnitudes below this switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-8;

/// Display language. Only affects the error token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Locale {
    /// Portuguese, shows "Erro".
    #[default]
    #[serde(rename = "pt")]
    #[value(name = "pt")]
    Portuguese,
    /// English, shows "Error".
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
}

impl Locale {
    /// The token shown in place of a non-finite result.
    pub fn error_token(self) -> &'static str {
        match self {
            Self::Portuguese => "Erro",
            Self::English => "Error",
        }
    }
}

/// Format a number for display.
///
/// - Non-finite values become the locale's error token.
/// - Very large or very small magnitudes use scientific notation
///   (`1.500000e12`, `2.000000e-9`).
/// - Everything else is rounded to 12 significant digits with trailing
///   fractional zeros removed.
pub fn format_number(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return locale.error_token().to_string();
    }

    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if !(SCIENTIFIC_LOWER..SCIENTIFIC_UPPER).contains(&abs) {
        // Rust never writes a `+` in the exponent.
        return format!("{:.*e}", SCIENTIFIC_DIGITS, value);
    }

    format_significant(value)
}

/// Fixed notation rounded to [`SIGNIFICANT_DIGITS`] significant digits.
fn format_significant(value: f64) -> String {
    // Round in scientific form first so the exponent reflects any carry
    // (9.999999999999 rounds to 10).
    let rounded = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let exponent: i32 = rounded
        .rsplit('e')
        .next()
        .and_then(|exp| exp.parse().ok())
        .unwrap_or(0);

    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
    strip_fraction(&format!("{:.*}", decimals, value))
}

/// Remove trailing fractional zeros and a dangling decimal point.
fn strip_fraction(formatted: &str) -> String {
    if !formatted.contains('.') {
        return formatted.to_string();
    }

    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Convert formatter output to decimal-comma notation.
pub fn to_display(formatted: &str) -> String {
    formatted.replacen('.', ",", 1)
}

/// Read a display-notation number (`-12,5`) back into a float.
///
/// Text that is not a number reads as NaN, which the engine treats as an
/// error like any other non-finite value.
pub fn parse_entry(text: &str) -> f64 {
    text.replacen(',', ".", 1).parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64) -> String {
        format_number(value, Locale::Portuguese)
    }

    #[test]
    fn test_zero() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(-0.0), "0");
    }

    #[test]
    fn test_non_finite_is_error_token() {
        assert_eq!(fmt(f64::NAN), "Erro");
        assert_eq!(fmt(f64::INFINITY), "Erro");
        assert_eq!(fmt(f64::NEG_INFINITY), "Erro");
        assert_eq!(format_number(f64::INFINITY, Locale::English), "Error");
    }

    #[test]
    fn test_integers_keep_their_zeros() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(100.0), "100");
        assert_eq!(fmt(100_000_000_000.0), "100000000000");
        assert_eq!(fmt(-2500.0), "-2500");
    }

    #[test]
    fn test_fraction_trailing_zeros_stripped() {
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(2.25), "2.25");
        assert_eq!(fmt(0.1 + 0.2), "0.3");
        assert_eq!(fmt(1.0 / 3.0), "0.333333333333");
        assert_eq!(fmt(2.0 / 3.0), "0.666666666667");
    }

    #[test]
    fn test_rounding_carry() {
        assert_eq!(fmt(9.9999999999999), "10");
        assert_eq!(fmt(0.99999999999999), "1");
    }

    #[test]
    fn test_small_values_stay_fixed_down_to_threshold() {
        assert_eq!(fmt(1e-8), "0.00000001");
        assert_eq!(fmt(0.000123), "0.000123");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(fmt(1e12), "1.000000e12");
        assert_eq!(fmt(1234567890123.0), "1.234568e12");
        assert_eq!(fmt(-5e15), "-5.000000e15");
        assert_eq!(fmt(2e-9), "2.000000e-9");
    }

    #[test]
    fn test_no_dangling_zeros_in_fixed_range() {
        for value in [1e-8, 0.125, 1.5, 42.0, 1e3, 123.456, 98765.4321, 999_999_999_999.0] {
            let formatted = fmt(value);
            if formatted.contains('.') {
                assert!(!formatted.ends_with('0'), "{formatted}");
                assert!(!formatted.ends_with('.'), "{formatted}");
            }
        }
    }

    #[test]
    fn test_display_conversion() {
        assert_eq!(to_display("12.5"), "12,5");
        assert_eq!(to_display("1.234568e12"), "1,234568e12");
        assert_eq!(to_display("7"), "7");
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("12,5"), 12.5);
        assert_eq!(parse_entry("-3"), -3.0);
        assert_eq!(parse_entry("0,"), 0.0);
        assert_eq!(parse_entry("1,5e12"), 1.5e12);
        assert!(parse_entry("Erro").is_nan());
    }
}
