//! Result and error types for the core library

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Currency, Money, OperationType};

/// Core library error type
///
/// Every variant is a rejected request. None of them leave an account
/// partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid currency code: {0}. Currency code must be exactly 3 characters long")]
    InvalidCurrencyCode(String),

    #[error("Money amount cannot be negative, got: {0}")]
    NegativeMoneyAmount(i64),

    #[error("Fee percentage cannot be negative, got: {0}")]
    NegativeFeePercentage(Decimal),

    #[error("Operation amount must be positive, got: {0}")]
    NonPositiveOperationAmount(i64),

    #[error(
        "Cannot perform operation: account currency ({expected}) does not match operation currency ({actual})"
    )]
    IncompatibleCurrency { expected: Currency, actual: Currency },

    #[error("Invalid operation type. Expected: {expected}")]
    InvalidOperationType { expected: OperationType },

    #[error(
        "Cannot perform debit operation: daily limit of {max_daily_debits} operations has been exceeded"
    )]
    DailyDebitLimitExceeded { max_daily_debits: u32 },

    #[error("Cannot perform debit operation of {attempted}: available balance is {available}")]
    InsufficientFunds { attempted: Money, available: Money },

    #[error("Invalid daily debit limit: {0}. Limit must be greater than zero")]
    InvalidDebitLimit(u32),

    #[error("Money amount does not fit in minor units")]
    AmountOverflow,
}

impl Error {
    /// Create an incompatible currency error
    pub fn incompatible_currency(expected: &Currency, actual: &Currency) -> Self {
        Self::IncompatibleCurrency {
            expected: expected.clone(),
            actual: actual.clone(),
        }
    }

    /// Short machine-readable name of the rejection
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCurrencyCode(_) => "invalid_currency_code",
            Self::NegativeMoneyAmount(_) => "negative_money_amount",
            Self::NegativeFeePercentage(_) => "negative_fee_percentage",
            Self::NonPositiveOperationAmount(_) => "non_positive_operation_amount",
            Self::IncompatibleCurrency { .. } => "incompatible_currency",
            Self::InvalidOperationType { .. } => "invalid_operation_type",
            Self::DailyDebitLimitExceeded { .. } => "daily_debit_limit_exceeded",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::InvalidDebitLimit(_) => "invalid_debit_limit",
            Self::AmountOverflow => "amount_overflow",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let mut context = HashMap::new();
                context.insert("kind".to_string(), serde_json::Value::from(e.kind()));
                Self::fail_with_context(e.to_string(), context)
            }
        }
    }
}
