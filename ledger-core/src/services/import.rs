//! Import - read ledger operation requests from CSV
//!
//! Expected header: `id,type,amount[,currency]`. Column names are matched
//! case-insensitively and may appear in any order. `type` is `credit` or
//! `debit`; `amount` is an integer number of minor units. When the currency
//! column is missing or empty, the account currency is used at replay time.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::OperationType;

/// One row of an import file, not yet validated against an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRequest {
    /// 1-based line number in the source file (header is line 1)
    pub line: u64,
    pub id: i64,
    pub kind: OperationType,
    /// Minor units as written in the file; may be zero or negative
    pub amount: i64,
    /// Raw currency code, validated when the request is applied
    pub currency: Option<String>,
}

/// A row that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of reading an import file
#[derive(Debug, Default, Serialize)]
pub struct ImportResult {
    pub requests: Vec<OperationRequest>,
    pub skipped: Vec<SkippedRow>,
}

/// Read operation requests from a CSV file
pub fn import_operations(file_path: &Path) -> Result<ImportResult> {
    let file = std::fs::File::open(file_path)
        .with_context(|| format!("Failed to open CSV file: {}", file_path.display()))?;
    read_operations(file)
}

/// Read operation requests from any CSV source
pub fn read_operations<R: Read>(source: R) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let id_idx = column("id").context("Column 'id' not found")?;
    let type_idx = column("type").context("Column 'type' not found")?;
    let amount_idx = column("amount").context("Column 'amount' not found")?;
    let currency_idx = column("currency");

    let mut result = ImportResult::default();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                result.skipped.push(SkippedRow {
                    line,
                    reason: format!("unreadable row: {}", e),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let parsed = parse_id(field(id_idx)).and_then(|id| {
            let kind = parse_kind(field(type_idx))?;
            let amount = parse_amount(field(amount_idx))?;
            Ok((id, kind, amount))
        });

        match parsed {
            Ok((id, kind, amount)) => {
                let currency = currency_idx
                    .map(field)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string);
                result.requests.push(OperationRequest {
                    line,
                    id,
                    kind,
                    amount,
                    currency,
                });
            }
            Err(reason) => result.skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(result)
}

fn parse_id(s: &str) -> std::result::Result<i64, String> {
    s.parse::<i64>().map_err(|_| format!("invalid id '{}'", s))
}

fn parse_kind(s: &str) -> std::result::Result<OperationType, String> {
    match s.to_lowercase().as_str() {
        "credit" => Ok(OperationType::Credit),
        "debit" => Ok(OperationType::Debit),
        _ => Err(format!("unknown operation type '{}'", s)),
    }
}

/// Parse minor units, allowing `_` and `,` as digit separators
fn parse_amount(s: &str) -> std::result::Result<i64, String> {
    let cleaned: String = s.chars().filter(|c| *c != '_' && *c != ',').collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| format!("invalid amount '{}'", s))
}
