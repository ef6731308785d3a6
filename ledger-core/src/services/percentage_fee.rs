//! Percentage transaction fee

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::Money;
use crate::ports::TransactionFeeCalculator;

/// Charges a fixed fraction on top of every debit
///
/// `fee_percentage` is a fraction: 0.005 adds half a percent.
#[derive(Debug, Clone, Copy)]
pub struct PercentageTransactionFeeCalculator {
    fee_percentage: Decimal,
}

impl PercentageTransactionFeeCalculator {
    pub fn new(fee_percentage: Decimal) -> Result<Self> {
        if fee_percentage < Decimal::ZERO {
            return Err(Error::NegativeFeePercentage(fee_percentage));
        }
        Ok(Self { fee_percentage })
    }

    pub fn fee_percentage(&self) -> Decimal {
        self.fee_percentage
    }
}

impl TransactionFeeCalculator for PercentageTransactionFeeCalculator {
    fn calculate_fee(&self, amount: &Money) -> Result<Money> {
        amount.multiply_by_percent(self.fee_percentage)
    }
}
