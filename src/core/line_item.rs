//! Line-item arithmetic.
//!
//! A line is quantity × rate with its own tax percentage. The form keeps the raw text of
//! each input; amounts are always recomputed from that text and cached as the formatted
//! `amount` string that is saved with the record.

use crate::{
    core::currency::{format_currency, numeric_prefix, parse_lenient},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Computed amounts for one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAmounts {
    /// quantity × rate
    pub subtotal: f64,
    /// subtotal × tax percent / 100
    pub tax_amount: f64,
    /// subtotal + tax amount
    pub total: f64,
}

/// Computes the amounts for a line from already-parsed inputs.
#[must_use]
pub fn compute_line(quantity: f64, rate: f64, tax_percent: f64) -> LineAmounts {
    let subtotal = quantity * rate;
    let tax_amount = subtotal * (tax_percent / 100.0);
    LineAmounts {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// One row of an invoice as it appears in the form and in saved records.
///
/// The numeric fields hold the text the user typed. `amount` is the formatted line total
/// and is only a display cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Free-text description, may span several lines
    pub description: String,
    /// Quantity as typed
    pub quantity: String,
    /// Unit rate as typed
    pub rate: String,
    /// Tax percentage as typed
    pub gst_percent: String,
    /// Cached formatted line total
    pub amount: String,
}

impl LineItem {
    /// A fresh row: quantity 1, zero rate, the given tax percentage and a `$0.00` amount.
    #[must_use]
    pub fn with_tax_percent(gst_percent: &str) -> Self {
        Self {
            description: String::new(),
            quantity: "1".to_string(),
            rate: "0.00".to_string(),
            gst_percent: gst_percent.to_string(),
            amount: format_currency(0.0),
        }
    }

    /// Computes this row's amounts, treating unparseable fields as zero.
    #[must_use]
    pub fn amounts(&self) -> LineAmounts {
        compute_line(
            parse_lenient(&self.quantity),
            parse_lenient(&self.rate),
            parse_lenient(&self.gst_percent),
        )
    }

    /// Computes this row's amounts, rejecting fields that are not valid numbers.
    ///
    /// Quantity and rate must be finite and non-negative; the tax percentage must lie in
    /// `0..=100`.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn amounts_strict(&self) -> Result<LineAmounts> {
        let quantity = parse_strict("quantity", &self.quantity)?;
        let rate = parse_strict("rate", &self.rate)?;
        let tax_percent = parse_strict("gstPercent", &self.gst_percent)?;
        if tax_percent > 100.0 {
            return Err(Error::Validation {
                field: "gstPercent".to_string(),
                message: format!("{tax_percent} is above 100"),
            });
        }
        Ok(compute_line(quantity, rate, tax_percent))
    }

    /// Recomputes the cached amount from the current inputs and returns the line total.
    pub fn recompute(&mut self) -> f64 {
        let total = self.amounts().total;
        self.amount = format_currency(total);
        total
    }

    /// Reads the cached amount back as a number.
    #[must_use]
    pub fn cached_total(&self) -> f64 {
        crate::core::currency::parse_currency(&self.amount)
    }
}

/// Parses a single numeric field, requiring the whole text to be a finite, non-negative
/// number.
///
/// # Errors
/// Returns [`Error::Validation`] when the text is empty, has trailing garbage, or is
/// negative or non-finite.
pub fn parse_strict(field: &str, text: &str) -> Result<f64> {
    let invalid = |message: String| Error::Validation {
        field: field.to_string(),
        message,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid("value is required".to_string()));
    }
    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|_| numeric_prefix(trimmed).is_some())
        .ok_or_else(|| invalid(format!("'{trimmed}' is not a number")))?;
    if !value.is_finite() {
        return Err(invalid(format!("'{trimmed}' is not a finite number")));
    }
    if value < 0.0 {
        return Err(invalid(format!("{value} is negative")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn line(quantity: &str, rate: &str, gst: &str) -> LineItem {
        LineItem {
            description: "Servicing".to_string(),
            quantity: quantity.to_string(),
            rate: rate.to_string(),
            gst_percent: gst.to_string(),
            amount: String::new(),
        }
    }

    #[test]
    fn test_compute_line() {
        let amounts = compute_line(3.0, 10.0, 8.0);
        assert_eq!(amounts.subtotal, 30.0);
        assert!((amounts.tax_amount - 2.4).abs() < 1e-9);
        assert!((amounts.total - 32.4).abs() < 1e-9);
    }

    #[test]
    fn test_compute_line_zero_tax() {
        let amounts = compute_line(2.0, 12.5, 0.0);
        assert_eq!(amounts.tax_amount, 0.0);
        assert_eq!(amounts.total, 25.0);
    }

    #[test]
    fn test_unparseable_quantity_is_zero() {
        let amounts = line("", "10", "8").amounts();
        assert_eq!(amounts.subtotal, 0.0);
        assert_eq!(amounts.tax_amount, 0.0);
        assert_eq!(amounts.total, 0.0);

        let amounts = line("abc", "10", "8").amounts();
        assert_eq!(amounts.total, 0.0);
    }

    #[test]
    fn test_recompute_replaces_cached_amount() {
        let mut item = line("3", "10.00", "8");
        item.amount = "$999.00".to_string();
        let total = item.recompute();
        assert!((total - 32.4).abs() < 1e-9);
        assert_eq!(item.amount, "$32.40");
        assert!((item.cached_total() - 32.4).abs() < 1e-9);

        item.quantity = "1".to_string();
        item.recompute();
        assert_eq!(item.amount, "$10.80");
    }

    #[test]
    fn test_default_row() {
        let item = LineItem::with_tax_percent("9");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.rate, "0.00");
        assert_eq!(item.gst_percent, "9");
        assert_eq!(item.amount, "$0.00");
    }

    #[test]
    fn test_strict_accepts_valid_line() {
        let amounts = line("3", "10.00", "8").amounts_strict().unwrap();
        assert!((amounts.total - 32.4).abs() < 1e-9);
    }

    #[test]
    fn test_strict_rejects_bad_fields() {
        let err = line("", "10", "8").amounts_strict().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "quantity"));

        let err = line("2", "12abc", "8").amounts_strict().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "rate"));

        let err = line("2", "-1", "8").amounts_strict().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "rate"));

        let err = line("2", "1", "150").amounts_strict().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "gstPercent"));

        assert!(line("2", "inf", "8").amounts_strict().is_err());
        assert!(line("NaN", "1", "8").amounts_strict().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&line("3", "10.00", "8")).unwrap();
        assert_eq!(
            json,
            r#"{"description":"Servicing","quantity":"3","rate":"10.00","gstPercent":"8","amount":""}"#
        );
    }
}
