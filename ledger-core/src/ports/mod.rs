//! Port definitions (hexagonal architecture)
//!
//! Ports define the capabilities an account depends on. The domain only
//! talks to these traits; concrete implementations live in `services`
//! (business rules) and `adapters` (time sources).

mod clock;
mod debit_limit;
mod fee;

pub use clock::Clock;
pub use debit_limit::DebitLimitPolicy;
pub use fee::TransactionFeeCalculator;
