//! Persisted record shapes.
//!
//! These structs serialize to exactly the JSON written by earlier versions of the tool:
//! camelCase keys in a fixed order, raw form text for line inputs, and formatted strings
//! for totals. Every field defaults when absent so older or partial records still load.

use crate::core::{line_item::LineItem, totals::TotalsSnapshot};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned};

/// A record kind that lives in its own collection of the storage namespace.
pub trait StoredRecord: Serialize + DeserializeOwned {
    /// Storage key of the collection holding records of this kind
    const COLLECTION: &'static str;
    /// Singular label used in log and history messages
    const LABEL: &'static str;
}

/// Current time in the ISO-8601 form saved with every record, e.g.
/// `2024-03-05T10:20:30.123Z`.
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Writes whole numbers without a fractional part (`8` rather than `8.0`).
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        let whole = *value as i64;
        serializer.serialize_i64(whole)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Issuing company details printed in the invoice header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    /// Company name
    pub name: String,
    /// Business registration number
    pub uen: String,
    /// Logo as a data URL, empty when none was loaded
    pub logo: String,
    /// Office phone
    pub office: String,
    /// Postal address
    pub address: String,
    /// Document tax rate in percent
    #[serde(serialize_with = "serialize_number")]
    pub gst_rate: f64,
    /// Tax registration number
    pub gst_registration: String,
}

/// Invoice customer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    /// Customer name
    pub name: String,
    /// Attention line
    pub attn: String,
    /// Telephone
    pub tel: String,
    /// Postal address
    pub address: String,
}

/// Invoice metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentInfo {
    /// Document date as `YYYY-MM-DD`
    pub date: String,
    /// Invoice or quotation number
    pub number: String,
    /// Customer's reference
    pub your_ref: String,
    /// Our reference
    pub our_ref: String,
    /// Payment terms, e.g. "30 Days"
    pub terms: String,
    /// Page marker, e.g. "01 of 01"
    pub page_info: String,
    /// Footer notes, newline separated
    pub notes: String,
    /// Name of the authorised signatory
    pub signatory: String,
}

/// A saved invoice or quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    /// Issuer
    pub company: CompanyInfo,
    /// Recipient
    pub customer: CustomerInfo,
    /// Metadata
    pub document: DocumentInfo,
    /// Rows in display order
    pub items: Vec<LineItem>,
    /// Totals exactly as displayed when saved
    pub totals: TotalsSnapshot,
    /// Save time
    pub timestamp: String,
}

impl StoredRecord for InvoiceRecord {
    const COLLECTION: &'static str = "invoices";
    const LABEL: &'static str = "invoice";
}

/// Service report customer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceCustomer {
    /// Customer name
    pub name: String,
    /// Site or postal address
    pub address: String,
}

/// Service visit metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportInfo {
    /// Report number
    pub number: String,
    /// Visit date as `YYYY-MM-DD`
    pub date: String,
    /// Where the work took place
    pub location: String,
    /// Technician who attended
    pub attended_by: String,
    /// Equipment type
    pub equipment_type: String,
    /// Model and serial numbers
    pub model_serial: String,
    /// Arrival time
    pub time_in: String,
    /// Departure time
    pub time_out: String,
}

/// Nature of the problem: category flags plus the customer's complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemInfo {
    /// Breakdown call
    pub breakdown_call: bool,
    /// Repair or modification
    pub repair_mod: bool,
    /// Installation of equipment
    pub install_equip: bool,
    /// Site inspection
    pub site_inspect: bool,
    /// Preventive maintenance
    pub prevent_main: bool,
    /// Testing and commissioning
    pub test_comm: bool,
    /// Complaint as reported by the customer
    pub nature_complaint: String,
    /// Whether ASD work was carried out
    pub asd_work: bool,
}

/// Work performed during the visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service rendered
    pub rendered: String,
    /// Materials supplied
    pub materials: String,
    /// Remarks
    pub remarks: String,
}

/// One signature box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureBlock {
    /// Captured signature as a data URL, `None` when nothing was drawn
    pub signature: Option<String>,
    /// Signer's name
    pub name: String,
    /// Signing date as `YYYY-MM-DD`
    pub date: String,
}

/// Technician and customer signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signatures {
    /// Technician
    pub tech: SignatureBlock,
    /// Customer
    pub cust: SignatureBlock,
}

/// A saved field-service report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceReportRecord {
    /// Customer
    pub customer: ServiceCustomer,
    /// Visit metadata
    pub report: ReportInfo,
    /// Problem categories and complaint
    pub problem: ProblemInfo,
    /// Work done
    pub service: ServiceInfo,
    /// Sign-off
    pub signatures: Signatures,
    /// Save time
    pub timestamp: String,
}

impl StoredRecord for ServiceReportRecord {
    const COLLECTION: &'static str = "serviceReports";
    const LABEL: &'static str = "service report";
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_invoice_record_reads_saved_json_verbatim() {
        let saved = r#"{"company":{"name":"MA M&E Services","uen":"201912345K","logo":"","office":"6123 4567","address":"1 Example Road","gstRate":8,"gstRegistration":"M90000000X"},"customer":{"name":"Acme","attn":"Ms Lee","tel":"9123 4567","address":"2 Sample Street"},"document":{"date":"2024-03-05","number":"INV-001","yourRef":"PO-7","ourRef":"Q-3","terms":"30 Days","pageInfo":"01 of 01","notes":"Thanks","signatory":"J. Tan"},"items":[{"description":"Aircon servicing","quantity":"3","rate":"10.00","gstPercent":"8","amount":"$32.40"}],"totals":{"subtotal":"$32.40","gstRate":"8","gst":"$2.59","grandTotal":"$34.99","amountInWords":"Thirty Four Dollars Only"},"timestamp":"2024-03-05T10:20:30.123Z"}"#;

        let record: InvoiceRecord = serde_json::from_str(saved).unwrap();
        assert!((record.company.gst_rate - 8.0).abs() < f64::EPSILON);
        assert_eq!(record.items[0].gst_percent, "8");
        assert_eq!(record.totals.grand_total, "$34.99");
        assert_eq!(serde_json::to_string(&record).unwrap(), saved);
    }

    #[test]
    fn test_fractional_rate_serializes_as_float() {
        let record = InvoiceRecord {
            company: CompanyInfo {
                gst_rate: 8.5,
                ..CompanyInfo::default()
            },
            ..InvoiceRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["company"]["gstRate"], serde_json::json!(8.5));
    }

    #[test]
    fn test_service_report_shape() {
        let saved = r#"{"customer":{"name":"Acme","address":"2 Sample Street"},"report":{"number":"SR-9","date":"2024-03-05","location":"Level 3","attendedBy":"Ravi","equipmentType":"Chiller","modelSerial":"X1/123","timeIn":"09:00","timeOut":"11:30"},"problem":{"breakdownCall":true,"repairMod":false,"installEquip":false,"siteInspect":true,"preventMain":false,"testComm":false,"natureComplaint":"Not cooling","asdWork":false},"service":{"rendered":"Topped up gas","materials":"R32","remarks":"Monitor"},"signatures":{"tech":{"signature":null,"name":"Ravi","date":"2024-03-05"},"cust":{"signature":"data:image/png;base64,AAAA","name":"Ms Lee","date":"2024-03-05"}},"timestamp":"2024-03-05T11:31:00.000Z"}"#;

        let record: ServiceReportRecord = serde_json::from_str(saved).unwrap();
        assert!(record.problem.breakdown_call);
        assert!(record.signatures.tech.signature.is_none());
        assert_eq!(serde_json::to_string(&record).unwrap(), saved);
    }

    #[test]
    fn test_missing_fields_default() {
        let record: InvoiceRecord =
            serde_json::from_str(r#"{"document":{"number":"Q-1"}}"#).unwrap();
        assert_eq!(record.document.number, "Q-1");
        assert!(record.items.is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-03-05T10:20:30.123Z".len());
    }
}
