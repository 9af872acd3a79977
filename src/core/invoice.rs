//! Invoice form state.
//!
//! [`InvoiceState`] is the single source of truth for an invoice being edited. Editing a
//! row's quantity, rate or tax percentage recomputes that row first and then the document
//! totals; changing the document tax rate only recomputes the totals.

use crate::{
    config::AppConfig,
    core::{
        currency::parse_lenient,
        line_item::{LineItem, parse_strict},
        totals::{DocumentTotals, aggregate, aggregate_totals},
    },
    errors::{Error, Result},
    models::{CompanyInfo, CustomerInfo, DocumentInfo, InvoiceRecord},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

/// Tax percentage given to a new row when the document rate field is empty.
pub const FALLBACK_ROW_TAX: &str = "8";

/// Live state of the invoice form.
#[derive(Debug, Clone)]
pub struct InvoiceState {
    /// Issuer details
    pub company: CompanyInfo,
    /// Recipient details
    pub customer: CustomerInfo,
    /// Metadata
    pub document: DocumentInfo,
    rows: Vec<LineItem>,
    tax_rate: String,
    totals: DocumentTotals,
    defaults: crate::config::FormDefaults,
}

impl InvoiceState {
    /// A blank invoice pre-filled from the configured company profile and defaults.
    ///
    /// # Errors
    /// Only fails if the initial totals cannot be computed, which a blank form never
    /// triggers.
    pub fn new(config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let company = CompanyInfo {
            name: config.company.name.clone(),
            uen: config.company.uen.clone(),
            office: config.company.office.clone(),
            address: config.company.address.clone(),
            gst_registration: config.company.gst_registration.clone(),
            gst_rate: config.defaults.gst_rate,
            ..CompanyInfo::default()
        };
        let tax_rate = config.defaults.gst_rate.to_string();

        let mut state = Self {
            company,
            customer: CustomerInfo::default(),
            document: DocumentInfo::default(),
            rows: Vec::new(),
            totals: aggregate(&[], 0.0)?,
            tax_rate,
            defaults: config.defaults.clone(),
        };
        state.reset(today)?;
        Ok(state)
    }

    /// Clears the customer, metadata and rows back to the configured defaults, leaving a
    /// single fresh row. The company profile and logo are kept.
    pub fn reset(&mut self, today: NaiveDate) -> Result<()> {
        self.customer = CustomerInfo::default();
        self.document = DocumentInfo {
            date: today.format("%Y-%m-%d").to_string(),
            terms: self.defaults.terms.clone(),
            page_info: self.defaults.page_info.clone(),
            notes: self.defaults.notes.clone(),
            ..DocumentInfo::default()
        };
        self.tax_rate = self.defaults.gst_rate.to_string();
        self.rows = vec![LineItem::with_tax_percent(&self.tax_rate)];
        self.recompute_totals()
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    /// Current totals.
    #[must_use]
    pub const fn totals(&self) -> &DocumentTotals {
        &self.totals
    }

    /// The document tax rate as typed.
    #[must_use]
    pub fn tax_rate_text(&self) -> &str {
        &self.tax_rate
    }

    /// The document tax rate as a number; unparseable text counts as zero.
    #[must_use]
    pub fn tax_rate(&self) -> f64 {
        parse_lenient(&self.tax_rate)
    }

    /// Appends a fresh row and returns its index. The row takes the document tax rate as
    /// its own tax percentage.
    pub fn add_row(&mut self) -> usize {
        let tax = if self.tax_rate.is_empty() {
            FALLBACK_ROW_TAX
        } else {
            self.tax_rate.as_str()
        };
        self.rows.push(LineItem::with_tax_percent(tax));
        self.rows.len() - 1
    }

    /// Removes the row at `index`; later rows move up one position.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for an unknown row.
    pub fn remove_row(&mut self, index: usize) -> Result<LineItem> {
        self.check_row(index)?;
        let remaining = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != index)
            .map(|(_, row)| row.cached_total());
        let totals = aggregate_totals(remaining, self.tax_rate())?;

        let removed = self.rows.remove(index);
        self.totals = totals;
        Ok(removed)
    }

    /// Updates a row's description. Amounts are unaffected.
    pub fn set_description(&mut self, index: usize, text: &str) -> Result<()> {
        self.check_row(index)?;
        self.rows[index].description = text.to_string();
        Ok(())
    }

    /// Updates a row's quantity and recomputes.
    pub fn set_quantity(&mut self, index: usize, text: &str) -> Result<()> {
        self.edit_row(index, |row| row.quantity = text.to_string())
    }

    /// Updates a row's rate and recomputes.
    pub fn set_rate(&mut self, index: usize, text: &str) -> Result<()> {
        self.edit_row(index, |row| row.rate = text.to_string())
    }

    /// Updates a row's tax percentage and recomputes.
    pub fn set_tax_percent(&mut self, index: usize, text: &str) -> Result<()> {
        self.edit_row(index, |row| row.gst_percent = text.to_string())
    }

    /// Updates the document tax rate and recomputes the totals.
    ///
    /// A rate that would make the grand total negative is rejected and the form is left
    /// unchanged.
    pub fn set_tax_rate(&mut self, text: &str) -> Result<()> {
        self.totals = aggregate(&self.rows, parse_lenient(text))?;
        self.tax_rate = text.to_string();
        Ok(())
    }

    /// Embeds a logo given as a data URL.
    pub fn set_logo(&mut self, data_url: String) {
        self.company.logo = data_url;
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    // The edited row and the new totals are committed together, or not at all.
    fn edit_row(&mut self, index: usize, edit: impl FnOnce(&mut LineItem)) -> Result<()> {
        self.check_row(index)?;
        let mut row = self.rows[index].clone();
        edit(&mut row);
        let total = row.recompute();

        let line_totals = self.rows.iter().enumerate().map(|(position, current)| {
            if position == index {
                total
            } else {
                current.cached_total()
            }
        });
        let totals = aggregate_totals(line_totals, self.tax_rate())?;
        debug!(row = index + 1, total, "Recomputed row");

        self.rows[index] = row;
        self.totals = totals;
        Ok(())
    }

    /// Recomputes the document totals from the cached row amounts.
    ///
    /// On error the previous totals are kept.
    pub fn recompute_totals(&mut self) -> Result<()> {
        self.totals = aggregate(&self.rows, self.tax_rate())?;
        Ok(())
    }

    /// Checks every numeric field strictly instead of coercing bad input to zero.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for the first invalid field, naming the row.
    pub fn validate(&self) -> Result<()> {
        parse_strict("gstRate", &self.tax_rate)?;
        for (index, row) in self.rows.iter().enumerate() {
            row.amounts_strict().map_err(|e| match e {
                Error::Validation { field, message } => Error::Validation {
                    field: format!("row {} {field}", index + 1),
                    message,
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Fills the form from a draft, going through the same edits a user would make.
    ///
    /// If any edit fails the form is left as it was.
    pub fn apply_draft(&mut self, draft: InvoiceDraft) -> Result<()> {
        let mut next = self.clone();
        next.fill_from(draft)?;
        *self = next;
        Ok(())
    }

    fn fill_from(&mut self, draft: InvoiceDraft) -> Result<()> {
        self.customer = draft.customer;
        let document = draft.document;
        if let Some(date) = document.date {
            self.document.date = date;
        }
        self.document.number = document.number;
        self.document.your_ref = document.your_ref;
        self.document.our_ref = document.our_ref;
        if let Some(terms) = document.terms {
            self.document.terms = terms;
        }
        if let Some(page_info) = document.page_info {
            self.document.page_info = page_info;
        }
        if let Some(notes) = document.notes {
            self.document.notes = notes;
        }
        self.document.signatory = document.signatory;

        if let Some(rate) = draft.gst_rate {
            self.set_tax_rate(&rate.into_text())?;
        }

        self.rows.clear();
        for item in draft.items {
            let index = self.add_row();
            self.set_description(index, &item.description)?;
            self.set_quantity(index, &item.quantity.into_text())?;
            self.set_rate(index, &item.rate.into_text())?;
            if let Some(tax) = item.gst_percent {
                self.set_tax_percent(index, &tax.into_text())?;
            }
        }
        if self.rows.is_empty() {
            self.add_row();
        }
        self.recompute_totals()
    }

    /// Freezes the current form into a record ready to be saved.
    #[must_use]
    pub fn snapshot(&self, timestamp: String) -> InvoiceRecord {
        InvoiceRecord {
            company: CompanyInfo {
                gst_rate: self.tax_rate(),
                ..self.company.clone()
            },
            customer: self.customer.clone(),
            document: self.document.clone(),
            items: self.rows.clone(),
            totals: self.totals.display(),
            timestamp,
        }
    }
}

/// A numeric form field in a draft file: either text or a TOML number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldText {
    /// Text exactly as it would be typed
    Text(String),
    /// Whole number
    Integer(i64),
    /// Decimal number
    Float(f64),
}

impl FieldText {
    /// The text the form field would hold.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

impl Default for FieldText {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// An invoice form filled in ahead of time, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceDraft {
    /// Document tax rate; keeps the configured default when absent
    pub gst_rate: Option<FieldText>,
    /// Recipient
    pub customer: CustomerInfo,
    /// Metadata
    pub document: DraftDocument,
    /// Rows
    pub items: Vec<DraftItem>,
}

/// Draft metadata; unset optional fields keep the form defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftDocument {
    /// `YYYY-MM-DD`, today when absent
    pub date: Option<String>,
    /// Document number
    pub number: String,
    /// Customer's reference
    pub your_ref: String,
    /// Our reference
    pub our_ref: String,
    /// Payment terms
    pub terms: Option<String>,
    /// Page marker
    pub page_info: Option<String>,
    /// Footer notes
    pub notes: Option<String>,
    /// Signatory
    pub signatory: String,
}

/// One draft row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftItem {
    /// Description
    pub description: String,
    /// Quantity
    pub quantity: FieldText,
    /// Unit rate
    pub rate: FieldText,
    /// Row tax percentage; the document rate when absent
    pub gst_percent: Option<FieldText>,
}
