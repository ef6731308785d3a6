//! Service layer - business rules and use-case orchestration
//!
//! The debit limit and fee implementations plug into the account through
//! the port traits; import and replay drive accounts from batch input.

mod daily_debit_limit;
pub mod import;
mod percentage_fee;
pub mod replay;

pub use daily_debit_limit::DailyDebitLimitPolicy;
pub use import::{import_operations, read_operations, ImportResult, OperationRequest, SkippedRow};
pub use percentage_fee::PercentageTransactionFeeCalculator;
pub use replay::{replay, OperationOutcome, OutcomeStatus, ReplaySummary};
