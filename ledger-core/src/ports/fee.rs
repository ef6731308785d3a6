//! Transaction fee port

use crate::domain::result::Result;
use crate::domain::Money;

/// Computes what a debit actually costs
pub trait TransactionFeeCalculator: Send + Sync {
    /// Return the fee-inclusive total (principal plus fee) for `amount`
    fn calculate_fee(&self, amount: &Money) -> Result<Money>;
}
