//! Replay command - apply a CSV of operations to an account

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::get_context;
use crate::output;
use ledger_core::services::{import_operations, replay, OutcomeStatus, ReplaySummary, SkippedRow};
use ledger_core::OperationResult;

#[derive(Serialize)]
struct ReplayOutput<'a> {
    skipped: &'a [SkippedRow],
    #[serde(flatten)]
    summary: &'a ReplaySummary,
}

pub fn run(file: &Path, account_id: i64, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let import = import_operations(file)?;

    let mut account = ctx.open_account(account_id);
    let summary = replay(&mut account, &import.requests);

    if json {
        let out = ReplayOutput {
            skipped: &import.skipped,
            summary: &summary,
        };
        output::json(&OperationResult::ok(out));
        return Ok(());
    }

    for row in &import.skipped {
        output::warning(&format!("Skipped line {}: {}", row.line, row.reason));
    }
    if !import.skipped.is_empty() {
        println!();
    }

    let mut table = output::create_table();
    table.set_header(vec!["Line", "ID", "Type", "Requested", "Settled", "Result"]);

    for outcome in &summary.outcomes {
        let settled = outcome
            .settled
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let result = match outcome.status {
            OutcomeStatus::Accepted => "accepted".to_string(),
            OutcomeStatus::Rejected => outcome.error.clone().unwrap_or_default(),
        };
        table.add_row(vec![
            outcome.line.to_string(),
            outcome.id.to_string(),
            outcome.kind.to_string(),
            outcome.requested.to_string(),
            settled,
            result,
        ]);
    }

    println!("{}", table);
    println!();
    println!(
        "{} accepted, {} rejected",
        summary.accepted.to_string().green(),
        summary.rejected.to_string().red()
    );
    output::success(&format!("Balance of account {}: {}", summary.account_id, summary.balance));

    Ok(())
}
