//! Clock port - source of "now"

use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock abstraction
///
/// Operation timestamps and the notion of "today" used by debit limits
/// both come from a clock, so tests can pin them exactly.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
