//! Currency display and the lenient number parsing shared by the document forms.
//!
//! Amounts are rendered with a `$` prefix, two fixed decimals and a comma every three
//! integer digits. Rounding works on the exact binary value of the `f64`, with exact ties
//! rounding away from zero, so `1.005` (stored just below the tie) renders as `$1.00` while
//! `0.125` renders as `$0.13`. Saved records depend on this exact text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Prefix placed before every formatted amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Formats an amount for display, e.g. `1234.5` → `"$1,234.50"`.
///
/// Negative amounts keep their sign after the symbol (`"$-12.00"`). Non-finite values
/// render as `"$NaN"` or `"$Infinity"`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{CURRENCY_SYMBOL}NaN");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{CURRENCY_SYMBOL}{sign}Infinity");
    }

    let fixed = to_fixed_two(amount);
    let (sign, unsigned) = fixed
        .strip_prefix('-')
        .map_or(("", fixed.as_str()), |rest| ("-", rest));
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!(
        "{CURRENCY_SYMBOL}{sign}{}.{fraction}",
        group_thousands(whole)
    )
}

fn to_fixed_two(amount: f64) -> String {
    // Normalise negative zero so it prints without a sign.
    let amount = if amount == 0.0 { 0.0 } else { amount };

    Decimal::from_f64_retain(amount).map_or_else(
        || format!("{amount:.2}"),
        |exact| {
            let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        },
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Recovers a number from a previously formatted amount such as `"$1,234.50"`.
///
/// Every character other than digits, `.` and `-` is dropped before parsing, and text that
/// still does not start with a number yields `0.0`.
#[must_use]
pub fn parse_currency(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    parse_lenient(&cleaned)
}

/// Parses a numeric form field the way the document forms always have: the longest
/// numeric prefix wins (`"12abc"` → `12.0`), and anything unparseable becomes `0.0`.
#[must_use]
pub fn parse_lenient(text: &str) -> f64 {
    numeric_prefix(text)
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

/// Parses the longest prefix of `text` that forms a decimal number.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an optional
/// fractional part, an optional exponent, or the literal `Infinity`. Returns `None` when
/// no digits are present.
#[must_use]
pub fn numeric_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_digits = count_digits(&bytes[cursor..]);
        if exp_digits > 0 {
            end = cursor + exp_digits;
        }
    }

    text[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
