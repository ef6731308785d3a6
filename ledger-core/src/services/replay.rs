//! Replay - apply a batch of operation requests to an account

use serde::Serialize;
use tracing::{debug, info};

use super::import::OperationRequest;
use crate::domain::result::Result;
use crate::domain::{BankAccount, Currency, Money, Operation, OperationType};

/// What happened to a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Accepted,
    Rejected,
}

/// Per-request result of a replay
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub line: u64,
    pub id: i64,
    pub kind: OperationType,
    pub requested: i64,
    /// Amount written to the log; fee-inclusive for debits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled: Option<i64>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

/// Summary of a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub account_id: i64,
    pub currency: Currency,
    pub accepted: usize,
    pub rejected: usize,
    pub balance: Money,
    pub outcomes: Vec<OperationOutcome>,
}

/// Apply `requests` to `account` in order
///
/// A rejected request is recorded and the replay moves on; it never aborts
/// the batch and never leaves a partial entry in the log.
pub fn replay(account: &mut BankAccount, requests: &[OperationRequest]) -> ReplaySummary {
    let mut outcomes = Vec::with_capacity(requests.len());

    for request in requests {
        let outcome = match apply(account, request) {
            Ok(settled) => {
                debug!(line = request.line, operation_id = request.id, "request accepted");
                OperationOutcome {
                    line: request.line,
                    id: request.id,
                    kind: request.kind,
                    requested: request.amount,
                    settled: Some(settled),
                    status: OutcomeStatus::Accepted,
                    error: None,
                    error_kind: None,
                }
            }
            Err(e) => {
                debug!(line = request.line, operation_id = request.id, error = %e, "request rejected");
                OperationOutcome {
                    line: request.line,
                    id: request.id,
                    kind: request.kind,
                    requested: request.amount,
                    settled: None,
                    status: OutcomeStatus::Rejected,
                    error: Some(e.to_string()),
                    error_kind: Some(e.kind()),
                }
            }
        };
        outcomes.push(outcome);
    }

    let accepted = outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Accepted)
        .count();
    let rejected = outcomes.len() - accepted;
    info!(account_id = account.id(), accepted, rejected, "replay finished");

    ReplaySummary {
        account_id: account.id(),
        currency: account.currency().clone(),
        accepted,
        rejected,
        balance: account.balance(),
        outcomes,
    }
}

/// Build the operation for `request` and submit it, returning the settled amount
fn apply(account: &mut BankAccount, request: &OperationRequest) -> Result<i64> {
    let currency = match &request.currency {
        Some(code) => Currency::from_code(code)?,
        None => account.currency().clone(),
    };
    let amount = Money::new(request.amount, currency)?;

    match request.kind {
        OperationType::Credit => {
            let operation = Operation::credit(request.id, amount, account.clock())?;
            account.credit(operation)?;
        }
        OperationType::Debit => {
            let operation = Operation::debit(request.id, amount, account.clock())?;
            account.debit(operation)?;
        }
    }

    Ok(account
        .operations()
        .last()
        .map(|op| op.amount().amount())
        .unwrap_or_default())
}
