//! Service report commands - save, preview, list, print and delete.

use crate::{
    cli::{Context, commands::read_draft},
    core::{
        data_url::load_data_url,
        history::render_history,
        print::PrintableServiceReport,
        service_report::{CapturedSignature, ServiceReportState},
        store::RecordStore,
    },
    errors::Result,
    models::{ServiceReportRecord, timestamp_now},
};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

/// Service report actions.
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Fill the form from a TOML draft, save it and print it
    Save {
        /// Draft file
        draft: PathBuf,
        /// Image of the technician's signature
        #[arg(long)]
        tech_signature: Option<PathBuf>,
        /// Image of the customer's signature
        #[arg(long)]
        cust_signature: Option<PathBuf>,
    },
    /// Fill the form from a TOML draft and print it without saving
    Preview {
        /// Draft file
        draft: PathBuf,
    },
    /// List saved service reports
    List,
    /// Print a saved service report
    Print {
        /// Position in the history list
        index: usize,
    },
    /// Delete a saved service report
    Delete {
        /// Position in the history list
        index: usize,
    },
}

/// Runs a service report action.
pub async fn run(command: ReportCommand, ctx: &Context<'_>) -> Result<String> {
    let store = RecordStore::<ServiceReportRecord>::new(ctx.database);
    match command {
        ReportCommand::Save {
            draft,
            tech_signature,
            cust_signature,
        } => {
            let state = load_form(&draft, ctx)?;
            let record = state.snapshot(
                &signature_from(tech_signature.as_deref()),
                &signature_from(cust_signature.as_deref()),
                timestamp_now(),
            );
            let index = store.append(&record).await?;
            Ok(format!(
                "Saved service report #{index}.\n\n{}",
                PrintableServiceReport::from_record(&record)
            ))
        }
        ReportCommand::Preview { draft } => {
            let state = load_form(&draft, ctx)?;
            Ok(PrintableServiceReport::from_state(&state).to_string())
        }
        ReportCommand::List => Ok(render_history(&store.list().await?)),
        ReportCommand::Print { index } => {
            let record = store.get(index).await?;
            Ok(PrintableServiceReport::from_record(&record).to_string())
        }
        ReportCommand::Delete { index } => {
            store.delete_at(index).await?;
            Ok(format!("Deleted service report #{index}."))
        }
    }
}

fn load_form(draft: &Path, ctx: &Context<'_>) -> Result<ServiceReportState> {
    let mut state: ServiceReportState = read_draft(draft)?;
    state.default_dates(ctx.today);
    info!(number = %state.report.number, "Loaded service report draft");
    Ok(state)
}

// An unreadable image counts as an empty pad.
fn signature_from(path: Option<&Path>) -> CapturedSignature {
    CapturedSignature(path.and_then(load_data_url))
}
