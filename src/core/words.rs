//! Cardinal numbers in English words, used for the "amount in words" line on invoices.

use crate::errors::{Error, Result};

/// Returned instead of words for values of one billion and above.
pub const TOO_LARGE: &str = "Number too large";

/// Appended to the words form of a grand total.
pub const CURRENCY_SUFFIX: &str = " Dollars Only";

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000;

/// Converts a whole number to English words.
///
/// Hundreds are joined to their remainder with "and" (`105` → "One Hundred and Five"),
/// while the tens band uses a plain space (`42` → "Forty Two"). Values of one billion or
/// more return [`TOO_LARGE`].
#[must_use]
pub fn number_to_words(n: u64) -> String {
    match n {
        0 => "Zero".to_string(),
        1..20 => ONES[index(n)].to_string(),
        20..100 => {
            let mut words = TENS[index(n / 10)].to_string();
            if n % 10 != 0 {
                words.push(' ');
                words.push_str(ONES[index(n % 10)]);
            }
            words
        }
        100..THOUSAND => {
            let mut words = format!("{} Hundred", ONES[index(n / 100)]);
            if n % 100 != 0 {
                words.push_str(" and ");
                words.push_str(&number_to_words(n % 100));
            }
            words
        }
        THOUSAND..MILLION => scaled(n, THOUSAND, "Thousand"),
        MILLION..BILLION => scaled(n, MILLION, "Million"),
        _ => TOO_LARGE.to_string(),
    }
}

fn scaled(n: u64, unit: u64, name: &str) -> String {
    let mut words = format!("{} {name}", number_to_words(n / unit));
    if n % unit != 0 {
        words.push(' ');
        words.push_str(&number_to_words(n % unit));
    }
    words
}

// Callers only pass values below 20, so the conversion is lossless.
#[allow(clippy::cast_possible_truncation)]
const fn index(n: u64) -> usize {
    n as usize
}

/// Renders a monetary amount as its words line, e.g. `1250.75` →
/// "One Thousand Two Hundred and Fifty Dollars Only".
///
/// The fractional part is discarded before conversion.
///
/// # Errors
/// Returns [`Error::NegativeAmount`] for negative or non-finite amounts.
pub fn amount_in_words(amount: f64) -> Result<String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::NegativeAmount { amount });
    }

    // Anything at or above one billion only ever produces the sentinel, so the cast below
    // stays well inside u64.
    #[allow(clippy::cast_precision_loss)]
    let limit = BILLION as f64;
    let whole = amount.floor().min(limit);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = whole as u64;
    let words = number_to_words(whole);

    Ok(format!("{words}{CURRENCY_SUFFIX}"))
}
