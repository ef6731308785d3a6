//! Core domain entities
//!
//! Value types (Currency, Money, Operation) and the BankAccount aggregate.
//! Pure data structures with validation logic - no I/O.

mod account;
mod currency;
mod money;
mod operation;
pub mod result;

pub use account::BankAccount;
pub use currency::Currency;
pub use money::Money;
pub use operation::{Operation, OperationType};
