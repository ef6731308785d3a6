//! Money domain model

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};
use super::Currency;

/// A non-negative amount of minor units in a single currency
///
/// Every binary operation checks that both sides share a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr")]
pub struct Money {
    amount: i64,
    currency: Currency,
}

/// Wire shape of `Money`, checked through `Money::new`
#[derive(Deserialize)]
struct MoneyRepr {
    amount: i64,
    currency: Currency,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = Error;

    fn try_from(repr: MoneyRepr) -> Result<Self> {
        Money::new(repr.amount, repr.currency)
    }
}

impl Money {
    /// Create money, rejecting negative amounts
    pub fn new(amount: i64, currency: Currency) -> Result<Self> {
        if amount < 0 {
            return Err(Error::NegativeMoneyAmount(amount));
        }
        Ok(Self { amount, currency })
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(Error::AmountOverflow)?;
        Money::new(amount, self.currency.clone())
    }

    /// Subtract, failing with the negative delta if the result would go below zero
    pub fn subtract(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(Error::AmountOverflow)?;
        Money::new(amount, self.currency.clone())
    }

    /// Scale by `1 + rate`, where `rate` is a fraction (0.005 is half a percent)
    ///
    /// The product is computed exactly and rounded half away from zero to
    /// whole minor units, so 100 at 0.005 becomes 101 and 99 stays 99.
    pub fn multiply_by_percent(&self, rate: Decimal) -> Result<Money> {
        if rate < Decimal::ZERO {
            return Err(Error::NegativeFeePercentage(rate));
        }
        let multiplier = Decimal::ONE
            .checked_add(rate)
            .ok_or(Error::AmountOverflow)?;
        let scaled = Decimal::from(self.amount)
            .checked_mul(multiplier)
            .ok_or(Error::AmountOverflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let amount = scaled.to_i64().ok_or(Error::AmountOverflow)?;
        Money::new(amount, self.currency.clone())
    }

    pub fn is_greater_than(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    pub fn is_less_than(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// Currency-checked equality
    ///
    /// Unlike `==`, comparing amounts across currencies is an error.
    pub fn equals(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount == other.amount)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(Error::incompatible_currency(&self.currency, &other.currency));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
