//! Core business logic - framework-agnostic calculation, form state and storage operations.

/// Formatting and lenient parsing of money
pub mod currency;
/// Images embedded as `data:` URLs
pub mod data_url;
/// Summaries for the history listing
pub mod history;
/// Invoice form state
pub mod invoice;
/// Per-row arithmetic
pub mod line_item;
/// Printable views
pub mod print;
/// Service report form state and signature capture
pub mod service_report;
/// Record collections in the key/value store
pub mod store;
/// Document totals
pub mod totals;
/// Numbers in English words
pub mod words;
