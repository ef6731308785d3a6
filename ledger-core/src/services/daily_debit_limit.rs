//! Daily debit limit policy

use std::fmt;
use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Operation;
use crate::ports::{Clock, DebitLimitPolicy};

/// Caps the number of debits settled per calendar day
///
/// "Today" is the clock's current date in UTC, and an operation counts when
/// its timestamp falls on that date. A history holding `max_daily_debits`
/// debits for today rejects the next one.
pub struct DailyDebitLimitPolicy {
    max_daily_debits: u32,
    clock: Arc<dyn Clock>,
}

impl DailyDebitLimitPolicy {
    pub fn new(max_daily_debits: u32, clock: Arc<dyn Clock>) -> Result<Self> {
        if max_daily_debits == 0 {
            return Err(Error::InvalidDebitLimit(max_daily_debits));
        }
        Ok(Self {
            max_daily_debits,
            clock,
        })
    }

    pub fn max_daily_debits(&self) -> u32 {
        self.max_daily_debits
    }

    /// Number of debits in `operations` that happened today
    pub fn today_debits_count(&self, operations: &[Operation]) -> usize {
        let today = self.clock.today();
        operations
            .iter()
            .filter(|op| op.is_debit() && op.timestamp().date_naive() == today)
            .count()
    }
}

impl DebitLimitPolicy for DailyDebitLimitPolicy {
    fn verify_debit_allowed(&self, operations: &[Operation]) -> Result<()> {
        let count = self.today_debits_count(operations);
        if count >= self.max_daily_debits as usize {
            return Err(Error::DailyDebitLimitExceeded {
                max_daily_debits: self.max_daily_debits,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for DailyDebitLimitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyDebitLimitPolicy")
            .field("max_daily_debits", &self.max_daily_debits)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::domain::{Currency, Money, OperationType};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 8, 15, 0).unwrap()
    }

    fn policy(max: u32) -> DailyDebitLimitPolicy {
        DailyDebitLimitPolicy::new(max, Arc::new(FixedClock::new(now()))).unwrap()
    }

    fn op(id: i64, kind: OperationType, at: DateTime<Utc>) -> Operation {
        let amount = Money::new(1000, Currency::from_code("USD").unwrap()).unwrap();
        Operation::recorded(id, amount, kind, at).unwrap()
    }

    #[test]
    fn test_allows_operations_within_limit() {
        let ops = vec![
            op(1, OperationType::Debit, now()),
            op(2, OperationType::Debit, now()),
        ];
        assert!(policy(3).verify_debit_allowed(&ops).is_ok());
    }

    #[test]
    fn test_rejects_when_limit_reached() {
        let ops = vec![
            op(1, OperationType::Debit, now()),
            op(2, OperationType::Debit, now()),
        ];
        assert_eq!(
            policy(2).verify_debit_allowed(&ops).unwrap_err(),
            Error::DailyDebitLimitExceeded { max_daily_debits: 2 }
        );
    }

    #[test]
    fn test_ignores_credit_operations() {
        let ops = vec![
            op(1, OperationType::Credit, now()),
            op(2, OperationType::Credit, now()),
            op(3, OperationType::Debit, now()),
        ];
        assert!(policy(2).verify_debit_allowed(&ops).is_ok());
    }

    #[test]
    fn test_ignores_operations_from_previous_days() {
        let old = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let ops = vec![
            op(1, OperationType::Debit, old),
            op(2, OperationType::Debit, old),
        ];
        assert!(policy(1).verify_debit_allowed(&ops).is_ok());
    }

    #[test]
    fn test_day_boundary_is_calendar_date_not_rolling_window() {
        // 8:15 today, so a debit at 23:59 yesterday is only ~8h old but still yesterday
        let just_before_midnight = Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 59).unwrap();
        let midnight = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let ops = vec![
            op(1, OperationType::Debit, just_before_midnight),
            op(2, OperationType::Debit, midnight),
        ];
        let policy = policy(2);
        assert_eq!(policy.today_debits_count(&ops), 1);
        assert!(policy.verify_debit_allowed(&ops).is_ok());
    }

    #[test]
    fn test_handles_empty_history() {
        assert!(policy(1).verify_debit_allowed(&[]).is_ok());
    }

    #[test]
    fn test_follows_the_clock() {
        let clock = Arc::new(FixedClock::new(now()));
        let policy = DailyDebitLimitPolicy::new(1, clock.clone()).unwrap();
        let ops = vec![op(1, OperationType::Debit, now())];
        assert!(policy.verify_debit_allowed(&ops).is_err());

        clock.advance(Duration::days(1));
        assert!(policy.verify_debit_allowed(&ops).is_ok());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    #[case(u32::MAX)]
    fn test_accepts_valid_limits(#[case] limit: u32) {
        assert_eq!(policy(limit).max_daily_debits(), limit);
    }

    #[test]
    fn test_rejects_zero_limit() {
        let err = DailyDebitLimitPolicy::new(0, Arc::new(FixedClock::new(now()))).unwrap_err();
        assert_eq!(err, Error::InvalidDebitLimit(0));
    }

    #[rstest]
    #[case(3, 2, true)]
    #[case(3, 3, false)]
    #[case(1, 0, true)]
    #[case(1, 1, false)]
    fn test_limit_boundary(#[case] limit: u32, #[case] today_debits: i64, #[case] allowed: bool) {
        let ops: Vec<Operation> = (0..today_debits)
            .map(|id| op(id, OperationType::Debit, now()))
            .collect();
        assert_eq!(policy(limit).verify_debit_allowed(&ops).is_ok(), allowed);
    }
}
