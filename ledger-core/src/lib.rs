//! Ledger Core - single-currency bank account ledger
//!
//! This crate implements the account ledger following hexagonal architecture:
//!
//! - **domain**: Value types (Currency, Money, Operation) and the BankAccount aggregate
//! - **ports**: Capabilities an account depends on (Clock, DebitLimitPolicy, TransactionFeeCalculator)
//! - **services**: Business rules (daily debit limit, percentage fee) and batch import/replay
//! - **adapters**: Concrete clocks
//!
//! The core is synchronous and does no I/O apart from the `config` and
//! `services::import` helpers used by front-ends.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use adapters::SystemClock;
use config::Config;
use ports::{Clock, DebitLimitPolicy, TransactionFeeCalculator};
use services::DailyDebitLimitPolicy;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{BankAccount, Currency, Money, Operation, OperationType};

/// Main context for ledger operations
///
/// Turns a `Config` into the shared collaborators every account needs and
/// opens accounts wired to them. Accounts opened from the same context
/// share one fee calculator, one debit policy and one clock.
pub struct LedgerContext {
    pub config: Config,
    currency: Currency,
    fee_calculator: Arc<dyn TransactionFeeCalculator>,
    debit_limit_policy: Arc<dyn DebitLimitPolicy>,
    clock: Arc<dyn Clock>,
}

impl LedgerContext {
    /// Create a context using the system clock
    pub fn new(config: Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a context with an explicit clock
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let currency = config.currency()?;
        let fee_calculator = config.fee_calculator()?;
        let debit_limit_policy =
            DailyDebitLimitPolicy::new(config.max_daily_debits, Arc::clone(&clock))?;

        tracing::debug!(
            currency = %currency,
            fee_percentage = %fee_calculator.fee_percentage(),
            max_daily_debits = config.max_daily_debits,
            "ledger context ready"
        );

        Ok(Self {
            config,
            currency,
            fee_calculator: Arc::new(fee_calculator),
            debit_limit_policy: Arc::new(debit_limit_policy),
            clock,
        })
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Open an empty account in the configured currency
    pub fn open_account(&self, id: i64) -> BankAccount {
        BankAccount::new(
            id,
            self.currency.clone(),
            Arc::clone(&self.fee_calculator),
            Arc::clone(&self.debit_limit_policy),
            Arc::clone(&self.clock),
        )
    }
}
