//! One-line summaries of saved records for the history listing.

use crate::{
    core::print::format_date,
    models::{InvoiceRecord, ServiceReportRecord, StoredRecord},
};
use std::fmt::{self, Write as _};

/// Summary of one saved record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Position in the collection
    pub index: usize,
    /// `<number> - <customer>`
    pub title: String,
    /// `<date> - <person>`
    pub subtitle: String,
    /// Expanded details, one `label: value` pair per line
    pub details: Vec<(&'static str, String)>,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.index, self.title)?;
        write!(f, "    {}", self.subtitle)?;
        for (label, value) in &self.details {
            write!(f, "\n    {label}: {value}")?;
        }
        Ok(())
    }
}

/// A stored record that can be listed in the history.
pub trait HistorySummary: StoredRecord {
    /// Shown when the collection holds nothing.
    const EMPTY_MESSAGE: &'static str;

    /// Builds the entry for this record at `index`.
    fn summary(&self, index: usize) -> HistoryEntry;
}

impl HistorySummary for InvoiceRecord {
    const EMPTY_MESSAGE: &'static str = "No saved invoices found.";

    fn summary(&self, index: usize) -> HistoryEntry {
        let date = format_date(&self.document.date);
        HistoryEntry {
            index,
            title: format!("{} - {}", self.document.number, self.customer.name),
            subtitle: format!(
                "{date} - {}",
                or_placeholder(&self.document.signatory, "No signatory")
            ),
            details: vec![
                ("Customer", self.customer.name.clone()),
                ("Date", date),
                ("Total", self.totals.grand_total.clone()),
            ],
        }
    }
}

impl HistorySummary for ServiceReportRecord {
    const EMPTY_MESSAGE: &'static str = "No saved service reports found.";

    fn summary(&self, index: usize) -> HistoryEntry {
        let date = format_date(&self.report.date);
        HistoryEntry {
            index,
            title: format!("{} - {}", self.report.number, self.customer.name),
            subtitle: format!(
                "{date} - {}",
                or_placeholder(&self.report.attended_by, "No technician")
            ),
            details: vec![
                ("Customer", self.customer.name.clone()),
                ("Date", date),
                ("Location", self.report.location.clone()),
            ],
        }
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Summarizes every record in collection order.
#[must_use]
pub fn summarize<T: HistorySummary>(records: &[T]) -> Vec<HistoryEntry> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.summary(index))
        .collect()
}

/// Renders the full listing, or the empty message when there is nothing saved.
#[must_use]
pub fn render_history<T: HistorySummary>(records: &[T]) -> String {
    if records.is_empty() {
        return T::EMPTY_MESSAGE.to_string();
    }
    let mut out = String::new();
    for entry in summarize(records) {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{entry}");
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_invoice, sample_service_report};

    #[test]
    fn test_invoice_summary() {
        let entry = sample_invoice("INV-001").summary(0);
        assert_eq!(entry.title, "INV-001 - Bob's Bakery");
        assert_eq!(entry.subtitle, "05 Mar 2024 - No signatory");
        assert_eq!(entry.details[2], ("Total", "$34.99".to_string()));

        let mut record = sample_invoice("INV-002");
        record.document.signatory = "J. Tan".to_string();
        record.document.date = String::new();
        assert_eq!(record.summary(1).subtitle, " - J. Tan");
    }

    #[test]
    fn test_report_summary() {
        let entry = sample_service_report("SR-001").summary(3);
        assert_eq!(entry.index, 3);
        assert_eq!(entry.title, "SR-001 - Bob's Bakery");
        assert_eq!(entry.subtitle, "05 Mar 2024 - Ravi");
        assert_eq!(entry.details[2], ("Location", "Kitchen".to_string()));

        let mut record = sample_service_report("SR-002");
        record.report.attended_by = String::new();
        assert_eq!(record.summary(0).subtitle, "05 Mar 2024 - No technician");
    }

    #[test]
    fn test_render_history() {
        assert_eq!(
            render_history::<InvoiceRecord>(&[]),
            "No saved invoices found."
        );
        assert_eq!(
            render_history::<ServiceReportRecord>(&[]),
            "No saved service reports found."
        );

        let text = render_history(&[sample_invoice("INV-001"), sample_invoice("INV-002")]);
        assert!(text.starts_with("[0] INV-001 - Bob's Bakery"));
        assert!(text.contains("[1] INV-002 - Bob's Bakery"));
        assert!(text.ends_with("Total: $34.99"));
    }
}
