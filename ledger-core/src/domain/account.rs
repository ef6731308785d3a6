//! Bank account aggregate

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::result::{Error, Result};
use super::{Currency, Money, Operation, OperationType};
use crate::ports::{Clock, DebitLimitPolicy, TransactionFeeCalculator};

/// A single-currency account backed by an append-only operation log
///
/// The balance is never stored; it is folded from the log on every read.
/// Fee calculator, debit policy and clock are shared collaborators that
/// the account only reads from.
pub struct BankAccount {
    id: i64,
    currency: Currency,
    operations: Vec<Operation>,
    fee_calculator: Arc<dyn TransactionFeeCalculator>,
    debit_limit_policy: Arc<dyn DebitLimitPolicy>,
    clock: Arc<dyn Clock>,
}

impl BankAccount {
    /// Create an account with an empty log
    pub fn new(
        id: i64,
        currency: Currency,
        fee_calculator: Arc<dyn TransactionFeeCalculator>,
        debit_limit_policy: Arc<dyn DebitLimitPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id,
            currency,
            operations: Vec::new(),
            fee_calculator,
            debit_limit_policy,
            clock,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Settled operations, oldest first
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The clock this account stamps settled debits with
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Record a credit exactly as submitted
    pub fn credit(&mut self, operation: Operation) -> Result<()> {
        self.ensure_currency(&operation)?;
        ensure_kind(&operation, OperationType::Credit)?;

        debug!(account_id = self.id, operation_id = operation.id(), "credit recorded");
        self.operations.push(operation);
        Ok(())
    }

    /// Settle a debit
    ///
    /// Checks run in a fixed order: currency, type, daily limit, then funds
    /// against the fee-inclusive amount. The log stores a new debit carrying
    /// the caller's id, the fee-inclusive amount and a fresh timestamp; the
    /// submitted operation is dropped.
    pub fn debit(&mut self, operation: Operation) -> Result<()> {
        self.ensure_currency(&operation)?;
        ensure_kind(&operation, OperationType::Debit)?;

        if let Err(e) = self.debit_limit_policy.verify_debit_allowed(&self.operations) {
            info!(account_id = self.id, operation_id = operation.id(), error = %e, "debit rejected");
            return Err(e);
        }

        let amount_with_fee = self.fee_calculator.calculate_fee(operation.amount())?;
        let current_balance = self.try_balance()?;

        if amount_with_fee.amount() > current_balance.amount() {
            info!(account_id = self.id, operation_id = operation.id(), "debit rejected: insufficient funds");
            return Err(Error::InsufficientFunds {
                attempted: amount_with_fee,
                available: current_balance,
            });
        }

        let settled = Operation::debit(operation.id(), amount_with_fee, self.clock.as_ref())?;
        debug!(
            account_id = self.id,
            operation_id = settled.id(),
            fee = settled.amount().amount() - operation.amount().amount(),
            "debit settled"
        );
        self.operations.push(settled);
        Ok(())
    }

    /// Current balance, folded from the log
    ///
    /// # Panics
    /// Panics if the log no longer folds to a non-negative amount in the
    /// account currency. `credit` and `debit` never append such a log.
    pub fn balance(&self) -> Money {
        match self.try_balance() {
            Ok(balance) => balance,
            Err(e) => panic!("ledger of account {} is inconsistent: {}", self.id, e),
        }
    }

    fn try_balance(&self) -> Result<Money> {
        self.operations
            .iter()
            .try_fold(Money::zero(self.currency.clone()), |balance, operation| {
                match operation.kind() {
                    OperationType::Credit => balance.add(operation.amount()),
                    OperationType::Debit => balance.subtract(operation.amount()),
                }
            })
    }

    fn ensure_currency(&self, operation: &Operation) -> Result<()> {
        let currency = operation.amount().currency();
        if *currency != self.currency {
            return Err(Error::incompatible_currency(&self.currency, currency));
        }
        Ok(())
    }
}

fn ensure_kind(operation: &Operation, expected: OperationType) -> Result<()> {
    if operation.kind() != expected {
        return Err(Error::InvalidOperationType { expected });
    }
    Ok(())
}

impl fmt::Debug for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankAccount")
            .field("id", &self.id)
            .field("currency", &self.currency)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}
