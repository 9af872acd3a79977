//! Invoice commands - save, preview, list, print and delete.

use crate::{
    cli::{Context, commands::read_draft},
    core::{
        data_url::load_data_url,
        history::render_history,
        invoice::{InvoiceDraft, InvoiceState},
        print::PrintableInvoice,
        store::RecordStore,
    },
    errors::Result,
    models::{InvoiceRecord, timestamp_now},
};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

/// Invoice actions.
#[derive(Debug, Subcommand)]
pub enum InvoiceCommand {
    /// Fill the form from a TOML draft, save it and print it
    Save {
        /// Draft file
        draft: PathBuf,
        /// Reject non-numeric quantities, rates and tax percentages
        #[arg(long)]
        strict: bool,
    },
    /// Fill the form from a TOML draft and print it without saving
    Preview {
        /// Draft file
        draft: PathBuf,
        /// Reject non-numeric quantities, rates and tax percentages
        #[arg(long)]
        strict: bool,
    },
    /// List saved invoices
    List,
    /// Print a saved invoice
    Print {
        /// Position in the history list
        index: usize,
    },
    /// Delete a saved invoice
    Delete {
        /// Position in the history list
        index: usize,
    },
}

/// Runs an invoice action.
pub async fn run(command: InvoiceCommand, ctx: &Context<'_>) -> Result<String> {
    let store = RecordStore::<InvoiceRecord>::new(ctx.database);
    match command {
        InvoiceCommand::Save { draft, strict } => {
            let state = load_form(&draft, strict, ctx)?;
            let record = state.snapshot(timestamp_now());
            let index = store.append(&record).await?;
            Ok(format!(
                "Saved invoice #{index}.\n\n{}",
                PrintableInvoice::from_record(&record)
            ))
        }
        InvoiceCommand::Preview { draft, strict } => {
            let state = load_form(&draft, strict, ctx)?;
            Ok(PrintableInvoice::from_state(&state).to_string())
        }
        InvoiceCommand::List => Ok(render_history(&store.list().await?)),
        InvoiceCommand::Print { index } => {
            let record = store.get(index).await?;
            Ok(PrintableInvoice::from_record(&record).to_string())
        }
        InvoiceCommand::Delete { index } => {
            store.delete_at(index).await?;
            Ok(format!("Deleted invoice #{index}."))
        }
    }
}

/// Builds the live form from the configured company profile and a draft file.
fn load_form(draft: &Path, strict: bool, ctx: &Context<'_>) -> Result<InvoiceState> {
    let mut state = InvoiceState::new(ctx.config, ctx.today)?;
    if let Some(logo) = ctx.config.company.logo_path.as_deref().and_then(load_data_url) {
        state.set_logo(logo);
    }

    state.apply_draft(read_draft::<InvoiceDraft>(draft)?)?;
    if strict {
        state.validate()?;
    }
    info!(
        number = %state.document.number,
        rows = state.rows().len(),
        grand_total = state.totals().grand_total,
        "Loaded invoice draft"
    );
    Ok(state)
}
