//! Debit limit port

use crate::domain::result::Result;
use crate::domain::Operation;

/// Decides whether another debit may be performed
///
/// Implementations inspect the settled history only; they never mutate it.
pub trait DebitLimitPolicy: Send + Sync {
    /// Fail if one more debit would break the policy
    ///
    /// # Arguments
    /// * `operations` - The account's settled log, oldest first. The debit
    ///   being attempted is not part of it.
    fn verify_debit_allowed(&self, operations: &[Operation]) -> Result<()>;
}
