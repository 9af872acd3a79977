//! Document-level totals for an invoice.
//!
//! The subtotal is the sum of each row's cached line total, so line-level tax is already
//! included. The document tax rate is then applied on top of that sum. Both layers are
//! kept exactly as saved invoices were computed.

use crate::{
    core::{
        currency::format_currency,
        line_item::LineItem,
        words::amount_in_words,
    },
    errors::Result,
};
use serde::{Deserialize, Serialize};

/// Numeric document totals.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTotals {
    /// Sum of all line totals
    pub subtotal: f64,
    /// Document tax rate in percent
    pub tax_rate: f64,
    /// subtotal × tax rate / 100
    pub tax: f64,
    /// subtotal × (1 + tax rate / 100)
    pub grand_total: f64,
    /// Words form of the floored grand total, with the currency suffix
    pub amount_in_words: String,
}

impl DocumentTotals {
    /// The display strings saved with a record and shown on the printed document.
    #[must_use]
    pub fn display(&self) -> TotalsSnapshot {
        TotalsSnapshot {
            subtotal: format_currency(self.subtotal),
            gst_rate: self.tax_rate.to_string(),
            gst: format_currency(self.tax),
            grand_total: format_currency(self.grand_total),
            amount_in_words: self.amount_in_words.clone(),
        }
    }
}

/// Formatted totals as persisted in an invoice record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TotalsSnapshot {
    /// Formatted subtotal
    pub subtotal: String,
    /// Tax rate as plain text, e.g. `"8"`
    pub gst_rate: String,
    /// Formatted tax amount
    pub gst: String,
    /// Formatted grand total
    pub grand_total: String,
    /// Amount in words
    pub amount_in_words: String,
}

/// Sums the line totals in sequence order and applies the document tax rate.
///
/// # Errors
/// Returns [`crate::errors::Error::NegativeAmount`] when the grand total is negative or
/// not finite, since it cannot be written out in words.
pub fn aggregate_totals<I>(line_totals: I, tax_rate: f64) -> Result<DocumentTotals>
where
    I: IntoIterator<Item = f64>,
{
    let subtotal = line_totals.into_iter().fold(0.0, |sum, total| sum + total);
    let tax = subtotal * (tax_rate / 100.0);
    let grand_total = subtotal * (1.0 + tax_rate / 100.0);

    Ok(DocumentTotals {
        subtotal,
        tax_rate,
        tax,
        grand_total,
        amount_in_words: amount_in_words(grand_total)?,
    })
}

/// Aggregates invoice rows using each row's cached `amount` text.
///
/// # Errors
/// See [`aggregate_totals`].
pub fn aggregate(lines: &[LineItem], tax_rate: f64) -> Result<DocumentTotals> {
    aggregate_totals(lines.iter().map(LineItem::cached_total), tax_rate)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;

    fn cached(amount: &str) -> LineItem {
        LineItem {
            amount: amount.to_string(),
            ..LineItem::default()
        }
    }

    #[test]
    fn test_aggregate_applies_document_tax_on_top() {
        let totals = aggregate(&[cached("$32.40"), cached("$10.00")], 8.0).unwrap();
        assert!((totals.subtotal - 42.4).abs() < 1e-9);
        assert!((totals.tax - 3.392).abs() < 1e-9);
        assert!((totals.grand_total - 45.792).abs() < 1e-9);
        assert_eq!(totals.amount_in_words, "Forty Five Dollars Only");

        let display = totals.display();
        assert_eq!(display.subtotal, "$42.40");
        assert_eq!(display.gst_rate, "8");
        assert_eq!(display.gst, "$3.39");
        assert_eq!(display.grand_total, "$45.79");
    }

    #[test]
    fn test_aggregate_tolerates_formatting_artifacts() {
        let totals = aggregate(&[cached("$1,234.50"), cached(""), cached("n/a")], 0.0).unwrap();
        assert_eq!(totals.subtotal, 1234.5);
        assert_eq!(totals.grand_total, 1234.5);
        assert_eq!(
            totals.amount_in_words,
            "One Thousand Two Hundred and Thirty Four Dollars Only"
        );
    }

    #[test]
    fn test_aggregate_empty_document() {
        let totals = aggregate(&[], 8.0).unwrap();
        assert_eq!(totals.grand_total, 0.0);
        assert_eq!(totals.amount_in_words, "Zero Dollars Only");
        assert_eq!(totals.display().grand_total, "$0.00");
    }

    #[test]
    fn test_fractional_rate_text() {
        let totals = aggregate(&[cached("$100.00")], 8.5).unwrap();
        assert_eq!(totals.display().gst_rate, "8.5");
        assert_eq!(totals.display().grand_total, "$108.50");
    }

    #[test]
    fn test_negative_grand_total_is_an_error() {
        let err = aggregate(&[cached("$-5.00")], 8.0).unwrap_err();
        assert!(matches!(err, Error::NegativeAmount { .. }));
    }
}
