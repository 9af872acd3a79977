//! General commands that don't touch the database.

use crate::{
    core::{currency::parse_currency, words::amount_in_words},
    errors::Result,
};

/// The amount-in-words line for `amount`; currency symbols and separators are ignored.
pub fn words(amount: &str) -> Result<String> {
    amount_in_words(parse_currency(amount))
}
