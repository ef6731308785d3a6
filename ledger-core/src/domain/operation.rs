//! Operation domain model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};
use super::Money;
use crate::ports::Clock;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Credit,
    Debit,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Credit => "CREDIT",
            OperationType::Debit => "DEBIT",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single credit or debit entry
///
/// Identity is the caller-assigned id: two operations with the same id are
/// equal regardless of amount, type or timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    id: i64,
    amount: Money,
    kind: OperationType,
    timestamp: DateTime<Utc>,
}

impl Operation {
    /// Create a credit stamped with the clock's current time
    pub fn credit(id: i64, amount: Money, clock: &dyn Clock) -> Result<Self> {
        Self::recorded(id, amount, OperationType::Credit, clock.now())
    }

    /// Create a debit stamped with the clock's current time
    pub fn debit(id: i64, amount: Money, clock: &dyn Clock) -> Result<Self> {
        Self::recorded(id, amount, OperationType::Debit, clock.now())
    }

    /// Create an operation with an explicit timestamp, e.g. when restoring a log
    pub fn recorded(
        id: i64,
        amount: Money,
        kind: OperationType,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if amount.amount() <= 0 {
            return Err(Error::NonPositiveOperationAmount(amount.amount()));
        }
        Ok(Self {
            id,
            amount,
            kind,
            timestamp,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_credit(&self) -> bool {
        self.kind == OperationType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == OperationType::Debit
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Operation {}
