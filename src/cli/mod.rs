//! Command-line layer - argument parsing and dispatch to the command handlers.
//!
//! Handlers return the text to print instead of writing to stdout themselves, which keeps
//! them testable against an in-memory database.

/// Command handlers grouped by document kind
pub mod commands;

use crate::{config::AppConfig, errors::Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use commands::{invoice::InvoiceCommand, report::ReportCommand};
use sea_orm::DatabaseConnection;

/// Invoices and field-service reports from the terminal.
#[derive(Debug, Parser)]
#[command(name = "invoice-desk", version, about)]
pub struct Cli {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, list, print and delete invoices
    Invoice {
        /// Invoice action
        #[command(subcommand)]
        command: InvoiceCommand,
    },
    /// Create, list, print and delete service reports
    Report {
        /// Report action
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Print the amount-in-words line for an amount
    Words {
        /// Amount, e.g. `1250.75` or `$1,250.75`
        amount: String,
    },
}

/// Everything a command handler needs.
pub struct Context<'a> {
    /// Loaded configuration
    pub config: &'a AppConfig,
    /// Open database
    pub database: &'a DatabaseConnection,
    /// Date new forms are stamped with
    pub today: NaiveDate,
}

/// Runs `command` and returns the text to print.
pub async fn run(command: Command, ctx: &Context<'_>) -> Result<String> {
    match command {
        Command::Invoice { command } => commands::invoice::run(command, ctx).await,
        Command::Report { command } => commands::report::run(command, ctx).await,
        Command::Words { amount } => commands::general::words(&amount),
    }
}
