//! Shared test utilities for invoice-desk.
//!
//! Helpers for setting up an in-memory database and building records with sensible
//! defaults.

use crate::{
    entities::{StorageEntry, storage_entry},
    errors::Result,
    models::{
        CompanyInfo, CustomerInfo, DocumentInfo, InvoiceRecord, ProblemInfo, ReportInfo,
        ServiceCustomer, ServiceReportRecord, SignatureBlock, Signatures,
    },
    core::{line_item::LineItem, totals::TotalsSnapshot},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all storage tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a one-line invoice with the given number.
///
/// # Defaults
/// * company: "Acme Engineering", tax rate 8
/// * customer: "Bob's Bakery"
/// * one row: 3 × 10.00 at 8%
pub fn sample_invoice(number: &str) -> InvoiceRecord {
    InvoiceRecord {
        company: CompanyInfo {
            name: "Acme Engineering".to_string(),
            uen: "201912345K".to_string(),
            gst_rate: 8.0,
            ..CompanyInfo::default()
        },
        customer: CustomerInfo {
            name: "Bob's Bakery".to_string(),
            attn: "Bob".to_string(),
            ..CustomerInfo::default()
        },
        document: DocumentInfo {
            date: "2024-03-05".to_string(),
            number: number.to_string(),
            terms: "30 Days".to_string(),
            page_info: "01 of 01".to_string(),
            ..DocumentInfo::default()
        },
        items: vec![LineItem {
            description: "Aircon servicing".to_string(),
            quantity: "3".to_string(),
            rate: "10.00".to_string(),
            gst_percent: "8".to_string(),
            amount: "$32.40".to_string(),
        }],
        totals: TotalsSnapshot {
            subtotal: "$32.40".to_string(),
            gst_rate: "8".to_string(),
            gst: "$2.59".to_string(),
            grand_total: "$34.99".to_string(),
            amount_in_words: "Thirty Four Dollars Only".to_string(),
        },
        timestamp: "2024-03-05T10:20:30.123Z".to_string(),
    }
}

/// Builds a service report with the given number and a technician signature only.
pub fn sample_service_report(number: &str) -> ServiceReportRecord {
    ServiceReportRecord {
        customer: ServiceCustomer {
            name: "Bob's Bakery".to_string(),
            address: "2 Sample Street".to_string(),
        },
        report: ReportInfo {
            number: number.to_string(),
            date: "2024-03-05".to_string(),
            location: "Kitchen".to_string(),
            attended_by: "Ravi".to_string(),
            ..ReportInfo::default()
        },
        problem: ProblemInfo {
            breakdown_call: true,
            nature_complaint: "Freezer not cooling".to_string(),
            ..ProblemInfo::default()
        },
        signatures: Signatures {
            tech: SignatureBlock {
                signature: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
                name: "Ravi".to_string(),
                date: "2024-03-05".to_string(),
            },
            cust: SignatureBlock::default(),
        },
        timestamp: "2024-03-05T11:00:00.000Z".to_string(),
        ..ServiceReportRecord::default()
    }
}

/// Writes `value` verbatim as the stored collection under `key`.
pub async fn put_raw_collection(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    storage_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Reads the stored text of the collection under `key`, empty when absent.
pub async fn raw_collection(db: &DatabaseConnection, key: &str) -> Result<String> {
    Ok(StorageEntry::find()
        .filter(storage_entry::Column::Key.eq(key))
        .one(db)
        .await?
        .map(|entry| entry.value)
        .unwrap_or_default())
}
