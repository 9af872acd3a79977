//! Printable views of invoices and service reports.
//!
//! A printable view is a read-only projection built on demand, either from live form
//! state or from a saved record. Views of saved records reproduce the stored totals
//! verbatim rather than recomputing them. Each view implements [`fmt::Display`] as a
//! plain-text print layout.

use crate::{
    core::{
        currency::{format_currency, parse_lenient},
        invoice::InvoiceState,
        line_item::LineItem,
        service_report::{ServiceReportState, Signer, nature_of_problem},
        totals::TotalsSnapshot,
    },
    models::{
        CompanyInfo, CustomerInfo, DocumentInfo, InvoiceRecord, ProblemInfo, ReportInfo,
        ServiceCustomer, ServiceInfo, ServiceReportRecord,
    },
};
use chrono::NaiveDate;
use std::fmt;

/// Printed in place of an empty signatory name.
pub const DEFAULT_SIGNATORY: &str = "Authorized Signature";

const RULE_WIDTH: usize = 78;

/// Renders a `YYYY-MM-DD` date as `05 Mar 2024`.
///
/// Empty input renders empty; anything unparseable renders as `Invalid Date`.
#[must_use]
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_or_else(|_| "Invalid Date".to_string(), |d| d.format("%d %b %Y").to_string())
}

/// One printed invoice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableRow {
    /// 1-based position
    pub number: usize,
    /// Description, line breaks preserved
    pub description: String,
    /// Quantity as entered
    pub quantity: String,
    /// Formatted unit rate
    pub rate: String,
    /// Tax percentage with a `%` sign
    pub gst_percent: String,
    /// Cached formatted line total
    pub amount: String,
}

/// An invoice ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableInvoice {
    /// Company name
    pub company_name: String,
    /// `UEN: ...`
    pub company_uen: String,
    /// `Office: ...`
    pub company_office: String,
    /// `Address: ...`
    pub company_address: String,
    /// Tax registration number
    pub gst_reg_no: String,
    /// Logo data URL, if one is embedded
    pub logo: Option<String>,
    /// Customer name
    pub customer_name: String,
    /// Customer address
    pub customer_address: String,
    /// Attention line
    pub customer_attn: String,
    /// Customer telephone
    pub customer_tel: String,
    /// Formatted document date
    pub date: String,
    /// Document number
    pub number: String,
    /// Customer's reference
    pub your_ref: String,
    /// Our reference
    pub our_ref: String,
    /// Payment terms
    pub terms: String,
    /// Page marker
    pub page_info: String,
    /// Rows
    pub rows: Vec<PrintableRow>,
    /// Footer notes, one entry per line
    pub notes: Vec<String>,
    /// Signatory, or [`DEFAULT_SIGNATORY`]
    pub signatory: String,
    /// Formatted subtotal
    pub subtotal: String,
    /// Document tax rate text
    pub gst_rate: String,
    /// Formatted tax
    pub gst: String,
    /// Formatted grand total
    pub grand_total: String,
    /// Amount in words
    pub amount_in_words: String,
}

impl PrintableInvoice {
    /// Projects the live form. Totals come from the state, which recomputes them on every
    /// edit, and the tax rate is printed in the same parsed form a saved record stores.
    #[must_use]
    pub fn from_state(state: &InvoiceState) -> Self {
        let totals = state.totals().display();
        let gst_rate = totals.gst_rate.clone();
        Self::build(
            &state.company,
            &state.customer,
            &state.document,
            state.rows(),
            totals,
            gst_rate,
        )
    }

    /// Projects a saved record, reusing its stored totals.
    #[must_use]
    pub fn from_record(record: &InvoiceRecord) -> Self {
        Self::build(
            &record.company,
            &record.customer,
            &record.document,
            &record.items,
            record.totals.clone(),
            record.company.gst_rate.to_string(),
        )
    }

    fn build(
        company: &CompanyInfo,
        customer: &CustomerInfo,
        document: &DocumentInfo,
        items: &[LineItem],
        totals: TotalsSnapshot,
        gst_rate: String,
    ) -> Self {
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| PrintableRow {
                number: index + 1,
                description: item.description.clone(),
                quantity: item.quantity.clone(),
                rate: format_currency(parse_lenient(&item.rate)),
                gst_percent: format!("{}%", item.gst_percent),
                amount: item.amount.clone(),
            })
            .collect();

        let signatory = if document.signatory.is_empty() {
            DEFAULT_SIGNATORY.to_string()
        } else {
            document.signatory.clone()
        };

        Self {
            company_name: company.name.clone(),
            company_uen: format!("UEN: {}", company.uen),
            company_office: format!("Office: {}", company.office),
            company_address: format!("Address: {}", company.address),
            gst_reg_no: company.gst_registration.clone(),
            logo: Some(company.logo.clone()).filter(|logo| !logo.is_empty()),
            customer_name: customer.name.clone(),
            customer_address: customer.address.clone(),
            customer_attn: customer.attn.clone(),
            customer_tel: customer.tel.clone(),
            date: format_date(&document.date),
            number: document.number.clone(),
            your_ref: document.your_ref.clone(),
            our_ref: document.our_ref.clone(),
            terms: document.terms.clone(),
            page_info: document.page_info.clone(),
            rows,
            notes: document.notes.lines().map(str::to_string).collect(),
            signatory,
            subtotal: totals.subtotal,
            gst_rate,
            gst: totals.gst,
            grand_total: totals.grand_total,
            amount_in_words: totals.amount_in_words,
        }
    }
}

impl fmt::Display for PrintableInvoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", self.company_name)?;
        writeln!(f, "{}", self.company_uen)?;
        writeln!(f, "{}", self.company_office)?;
        writeln!(f, "{}", self.company_address)?;
        if !self.gst_reg_no.is_empty() {
            writeln!(f, "GST Reg No: {}", self.gst_reg_no)?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "To:   {}", self.customer_name)?;
        for line in self.customer_address.lines() {
            writeln!(f, "      {line}")?;
        }
        writeln!(f, "Attn: {}    Tel: {}", self.customer_attn, self.customer_tel)?;
        writeln!(f, "Date: {}    No: {}", self.date, self.number)?;
        writeln!(f, "Your Ref: {}    Our Ref: {}", self.your_ref, self.our_ref)?;
        writeln!(f, "Terms: {}    Page: {}", self.terms, self.page_info)?;
        writeln!(f, "{thin}")?;
        writeln!(
            f,
            "{:>3}  {:<32} {:>6} {:>12} {:>6} {:>12}",
            "No", "Description", "Qty", "Rate", "GST", "Amount"
        )?;
        writeln!(f, "{thin}")?;
        for row in &self.rows {
            let mut lines = row.description.lines();
            writeln!(
                f,
                "{:>3}  {:<32} {:>6} {:>12} {:>6} {:>12}",
                row.number,
                lines.next().unwrap_or_default(),
                row.quantity,
                row.rate,
                row.gst_percent,
                row.amount
            )?;
            for line in lines {
                writeln!(f, "     {line}")?;
            }
        }
        writeln!(f, "{thin}")?;
        writeln!(f, "{:>62} {:>15}", "Subtotal:", self.subtotal)?;
        writeln!(f, "{:>62} {:>15}", format!("GST ({}%):", self.gst_rate), self.gst)?;
        writeln!(f, "{:>62} {:>15}", "Grand Total:", self.grand_total)?;
        writeln!(f, "{}", self.amount_in_words)?;
        writeln!(f, "{rule}")?;
        for note in &self.notes {
            writeln!(f, "{note}")?;
        }
        writeln!(f)?;
        writeln!(f, "______________________")?;
        write!(f, "{}", self.signatory)
    }
}

/// A service report ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableServiceReport {
    /// Customer name
    pub customer_name: String,
    /// Customer address
    pub customer_address: String,
    /// Report number
    pub number: String,
    /// Formatted visit date
    pub date: String,
    /// Location
    pub location: String,
    /// Technician
    pub attended_by: String,
    /// Equipment type
    pub equipment_type: String,
    /// Model and serial numbers
    pub model_serial: String,
    /// Arrival time
    pub time_in: String,
    /// Departure time
    pub time_out: String,
    /// Ticked problem categories joined by ", "
    pub nature_of_problem: String,
    /// `Yes` or `No`
    pub asd_work: String,
    /// Customer complaint
    pub nature_complaint: String,
    /// Service rendered
    pub service_rendered: String,
    /// Materials supplied
    pub materials_supplied: String,
    /// Remarks
    pub remarks: String,
    /// Technician name
    pub tech_name: String,
    /// Formatted technician signing date
    pub tech_date: String,
    /// Technician signature data URL, when captured
    pub tech_signature: Option<String>,
    /// Customer name on the sign-off
    pub cust_name: String,
    /// Formatted customer signing date
    pub cust_date: String,
    /// Customer signature data URL, when captured
    pub cust_signature: Option<String>,
}

impl PrintableServiceReport {
    /// Projects the live form. Signature pads are not part of the form state, so the view
    /// carries no signature images.
    #[must_use]
    pub fn from_state(state: &ServiceReportState) -> Self {
        Self::build(
            &state.customer,
            &state.report,
            &state.problem,
            &state.service,
            [(&state.tech, None), (&state.cust, None)],
        )
    }

    /// Projects a saved record.
    #[must_use]
    pub fn from_record(record: &ServiceReportRecord) -> Self {
        let tech = Signer {
            name: record.signatures.tech.name.clone(),
            date: record.signatures.tech.date.clone(),
        };
        let cust = Signer {
            name: record.signatures.cust.name.clone(),
            date: record.signatures.cust.date.clone(),
        };
        Self::build(
            &record.customer,
            &record.report,
            &record.problem,
            &record.service,
            [
                (&tech, record.signatures.tech.signature.clone()),
                (&cust, record.signatures.cust.signature.clone()),
            ],
        )
    }

    fn build(
        customer: &ServiceCustomer,
        report: &ReportInfo,
        problem: &ProblemInfo,
        service: &ServiceInfo,
        [(tech, tech_signature), (cust, cust_signature)]: [(&Signer, Option<String>); 2],
    ) -> Self {
        Self {
            customer_name: customer.name.clone(),
            customer_address: customer.address.clone(),
            number: report.number.clone(),
            date: format_date(&report.date),
            location: report.location.clone(),
            attended_by: report.attended_by.clone(),
            equipment_type: report.equipment_type.clone(),
            model_serial: report.model_serial.clone(),
            time_in: report.time_in.clone(),
            time_out: report.time_out.clone(),
            nature_of_problem: nature_of_problem(problem),
            asd_work: if problem.asd_work { "Yes" } else { "No" }.to_string(),
            nature_complaint: problem.nature_complaint.clone(),
            service_rendered: service.rendered.clone(),
            materials_supplied: service.materials.clone(),
            remarks: service.remarks.clone(),
            tech_name: tech.name.clone(),
            tech_date: format_date(&tech.date),
            tech_signature,
            cust_name: cust.name.clone(),
            cust_date: format_date(&cust.date),
            cust_signature,
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, title: &str, body: &str) -> fmt::Result {
    writeln!(f, "{title}:")?;
    for line in body.lines() {
        writeln!(f, "  {line}")?;
    }
    Ok(())
}

impl fmt::Display for PrintableServiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let signed = |signature: &Option<String>| {
            if signature.is_some() { "[signed]" } else { "" }
        };

        writeln!(f, "SERVICE REPORT  No: {}    Date: {}", self.number, self.date)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Customer: {}", self.customer_name)?;
        for line in self.customer_address.lines() {
            writeln!(f, "          {line}")?;
        }
        writeln!(f, "Location: {}    Attended by: {}", self.location, self.attended_by)?;
        writeln!(
            f,
            "Equipment: {}    Model/Serial: {}",
            self.equipment_type, self.model_serial
        )?;
        writeln!(f, "Time in: {}    Time out: {}", self.time_in, self.time_out)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Nature of problem: {}", self.nature_of_problem)?;
        writeln!(f, "ASD work: {}", self.asd_work)?;
        write_block(f, "Nature of complaint", &self.nature_complaint)?;
        write_block(f, "Service rendered", &self.service_rendered)?;
        write_block(f, "Materials supplied", &self.materials_supplied)?;
        write_block(f, "Remarks", &self.remarks)?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Technician: {} {}    Date: {}",
            self.tech_name,
            signed(&self.tech_signature),
            self.tech_date
        )?;
        write!(
            f,
            "Customer:   {} {}    Date: {}",
            self.cust_name,
            signed(&self.cust_signature),
            self.cust_date
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::AppConfig;
    use crate::core::service_report::ProblemCategory;
    use crate::test_utils::{sample_invoice, sample_service_report};

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "05 Mar 2024");
        assert_eq!(format_date("2023-12-25"), "25 Dec 2023");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("next tuesday"), "Invalid Date");
    }

    #[test]
    fn test_saved_invoice_prints_stored_totals_verbatim() {
        let mut record = sample_invoice("INV-001");
        // Stale inputs must not leak into the printed totals
        record.items[0].quantity = "999".to_string();
        record.document.notes = "Line one\nLine two".to_string();

        let view = PrintableInvoice::from_record(&record);
        assert_eq!(view.company_uen, "UEN: 201912345K");
        assert_eq!(view.company_office, "Office: ");
        assert_eq!(view.date, "05 Mar 2024");
        assert_eq!(view.rows[0].number, 1);
        assert_eq!(view.rows[0].rate, "$10.00");
        assert_eq!(view.rows[0].gst_percent, "8%");
        assert_eq!(view.rows[0].amount, "$32.40");
        assert_eq!(view.grand_total, "$34.99");
        assert_eq!(view.gst_rate, "8");
        assert_eq!(view.notes, vec!["Line one", "Line two"]);
        assert_eq!(view.signatory, DEFAULT_SIGNATORY);
        assert!(view.logo.is_none());

        let text = view.to_string();
        assert!(text.contains("Grand Total:"));
        assert!(text.contains("$34.99"));
        assert!(text.contains("Thirty Four Dollars Only"));
    }

    #[test]
    fn test_live_invoice_view_uses_current_totals() {
        let mut state = InvoiceState::new(
            &AppConfig::default(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
        .unwrap();
        state.document.signatory = "J. Tan".to_string();
        state.set_description(0, "Fan coil\nlevel 2").unwrap();
        state.set_quantity(0, "3").unwrap();
        state.set_rate(0, "").unwrap();
        let index = state.add_row();
        state.set_rate(index, "1234.5").unwrap();
        state.set_tax_percent(index, "0").unwrap();

        let view = PrintableInvoice::from_state(&state);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].rate, "$0.00");
        assert_eq!(view.rows[1].rate, "$1,234.50");
        assert_eq!(view.subtotal, "$1,234.50");
        assert_eq!(view.grand_total, "$1,333.26");
        assert_eq!(
            view.amount_in_words,
            "One Thousand Three Hundred and Thirty Three Dollars Only"
        );
        assert_eq!(view.signatory, "J. Tan");

        let text = view.to_string();
        assert!(text.contains("     level 2"));
    }

    #[test]
    fn test_live_and_saved_views_print_same_tax_rate() {
        let mut state = InvoiceState::new(
            &AppConfig::default(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
        .unwrap();
        state.set_rate(0, "10").unwrap();

        state.set_tax_rate("08").unwrap();
        let live = PrintableInvoice::from_state(&state);
        let saved = PrintableInvoice::from_record(&state.snapshot("t".to_string()));
        assert_eq!(live.gst_rate, "8");
        assert_eq!(saved.gst_rate, "8");
        assert_eq!(live.grand_total, saved.grand_total);
        assert!(live.to_string().contains("GST (8%):"));

        state.set_tax_rate("").unwrap();
        let live = PrintableInvoice::from_state(&state);
        let saved = PrintableInvoice::from_record(&state.snapshot("t".to_string()));
        assert_eq!(live.gst_rate, "0");
        assert_eq!(saved.gst_rate, "0");
        assert_eq!(live.grand_total, "$10.80");
    }

    #[test]
    fn test_service_report_views() {
        let record = sample_service_report("SR-001");
        let view = PrintableServiceReport::from_record(&record);
        assert_eq!(view.nature_of_problem, "Breakdown Call");
        assert_eq!(view.asd_work, "No");
        assert_eq!(view.date, "05 Mar 2024");
        assert!(view.tech_signature.is_some());
        assert!(view.cust_signature.is_none());
        assert!(view.to_string().contains("Ravi [signed]"));

        let mut state = ServiceReportState::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        ProblemCategory::PreventiveMaintenance.set(&mut state.problem, true);
        ProblemCategory::RepairModification.set(&mut state.problem, true);
        state.problem.asd_work = true;
        let view = PrintableServiceReport::from_state(&state);
        assert_eq!(
            view.nature_of_problem,
            "Repair/Modification, Preventive Maintenance"
        );
        assert_eq!(view.asd_work, "Yes");
        assert_eq!(view.cust_date, "05 Mar 2024");
        assert!(view.tech_signature.is_none());
    }
}
