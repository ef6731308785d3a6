//! Integration tests for ledger-core
//!
//! These tests drive accounts through the public API only: a context built
//! from config, operations stamped by a fixed clock, and CSV replays.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use ledger_core::adapters::FixedClock;
use ledger_core::config::{Config, SETTINGS_FILE};
use ledger_core::services::{import_operations, replay, OutcomeStatus};
use ledger_core::{BankAccount, Currency, Error, LedgerContext, Money, Operation};

// ============================================================================
// Test Helpers
// ============================================================================

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 10, 0, 0).unwrap()
}

/// Context with the default config (USD, 0.5% fee, 3 debits a day) and a fixed clock
fn create_context() -> (LedgerContext, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(start_time()));
    let context = LedgerContext::with_clock(Config::default(), clock.clone()).unwrap();
    (context, clock)
}

fn usd(amount: i64) -> Money {
    Money::new(amount, Currency::from_code("USD").unwrap()).unwrap()
}

fn credit(account: &mut BankAccount, id: i64, amount: i64) -> ledger_core::Result<()> {
    let op = Operation::credit(id, usd(amount), account.clock())?;
    account.credit(op)
}

fn debit(account: &mut BankAccount, id: i64, amount: i64) -> ledger_core::Result<()> {
    let op = Operation::debit(id, usd(amount), account.clock())?;
    account.debit(op)
}

// ============================================================================
// Balance Scenarios
// ============================================================================

#[test]
fn test_new_account_has_zero_balance() {
    let (context, _) = create_context();
    let account = context.open_account(1);
    assert_eq!(account.balance(), Money::zero(context.currency().clone()));
}

#[test]
fn test_credit_then_debit_with_fee() {
    let (context, _) = create_context();
    let mut account = context.open_account(1);

    credit(&mut account, 1, 10000).unwrap();
    debit(&mut account, 2, 5000).unwrap();

    assert_eq!(account.balance().amount(), 4975);
}

#[test]
fn test_mixed_sequence_balance() {
    let (context, _) = create_context();
    let mut account = context.open_account(1);

    credit(&mut account, 1, 10000).unwrap();
    debit(&mut account, 2, 2000).unwrap();
    credit(&mut account, 3, 5000).unwrap();
    debit(&mut account, 4, 1000).unwrap();

    // 10000 - 2010 + 5000 - 1005
    assert_eq!(account.balance().amount(), 11985);
    assert_eq!(account.balance(), account.balance());
}

#[test]
fn test_balance_is_a_fold_of_the_log() {
    let (context, _) = create_context();
    let mut account = context.open_account(1);

    credit(&mut account, 1, 7000).unwrap();
    debit(&mut account, 2, 1234).unwrap();
    credit(&mut account, 3, 66).unwrap();

    let folded: i64 = account
        .operations()
        .iter()
        .map(|op| {
            if op.is_credit() {
                op.amount().amount()
            } else {
                -op.amount().amount()
            }
        })
        .sum();
    assert_eq!(account.balance().amount(), folded);
}

#[test]
fn test_failed_debit_leaves_log_untouched() {
    let (context, _) = create_context();
    let mut account = context.open_account(1);
    credit(&mut account, 1, 1000).unwrap();
    let before: Vec<i64> = account.operations().iter().map(|op| op.id()).collect();

    let err = debit(&mut account, 2, 1000).unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(
        err.to_string(),
        "Cannot perform debit operation of 1005 USD: available balance is 1000 USD"
    );

    let after: Vec<i64> = account.operations().iter().map(|op| op.id()).collect();
    assert_eq!(before, after);
    assert_eq!(account.balance().amount(), 1000);
}

// ============================================================================
// Daily Limit Across Days
// ============================================================================

#[test]
fn test_daily_limit_counts_only_today() {
    let (context, clock) = create_context();
    let mut account = context.open_account(1);
    credit(&mut account, 1, 1_000_000).unwrap();

    for id in 2..5 {
        debit(&mut account, id, 100).unwrap();
    }
    assert_eq!(
        debit(&mut account, 5, 100).unwrap_err(),
        Error::DailyDebitLimitExceeded { max_daily_debits: 3 }
    );

    // Same calendar day, later in the evening: still blocked
    clock.set(Utc.with_ymd_and_hms(2025, 11, 3, 23, 59, 59).unwrap());
    assert!(debit(&mut account, 6, 100).is_err());

    // One second later it is a new day
    clock.advance(Duration::seconds(1));
    debit(&mut account, 7, 100).unwrap();

    let debits = account.operations().iter().filter(|op| op.is_debit()).count();
    assert_eq!(debits, 4);
}

#[test]
fn test_contexts_share_configuration_but_not_logs() {
    let (context, _) = create_context();
    let mut first = context.open_account(1);
    let mut second = context.open_account(2);

    credit(&mut first, 1, 5000).unwrap();
    credit(&mut second, 1, 5000).unwrap();
    for id in 2..5 {
        debit(&mut first, id, 100).unwrap();
    }

    // The limit is evaluated against each account's own log
    debit(&mut second, 2, 100).unwrap();
    assert_eq!(second.balance().amount(), 5000 - 101);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_context_from_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(SETTINGS_FILE),
        r#"{"account": {"currency": "pln", "feePercentage": "0.01", "maxDailyDebits": 1}}"#,
    )
    .unwrap();

    let config = Config::load_with_env(temp_dir.path(), |_| None).unwrap();
    let clock = Arc::new(FixedClock::new(start_time()));
    let context = LedgerContext::with_clock(config, clock).unwrap();
    let mut account = context.open_account(3);

    let pln = Currency::from_code("PLN").unwrap();
    let op = Operation::credit(1, Money::new(10000, pln.clone()).unwrap(), account.clock()).unwrap();
    account.credit(op).unwrap();
    let op = Operation::debit(2, Money::new(1000, pln.clone()).unwrap(), account.clock()).unwrap();
    account.debit(op).unwrap();

    assert_eq!(account.balance(), Money::new(10000 - 1010, pln.clone()).unwrap());

    let op = Operation::debit(3, Money::new(1, pln).unwrap(), account.clock()).unwrap();
    assert_eq!(
        account.debit(op).unwrap_err(),
        Error::DailyDebitLimitExceeded { max_daily_debits: 1 }
    );
}

#[test]
fn test_context_rejects_invalid_config() {
    let config = Config {
        fee_percentage: Decimal::new(-1, 3),
        ..Config::default()
    };
    assert!(matches!(
        LedgerContext::new(config),
        Err(Error::NegativeFeePercentage(_))
    ));

    let config = Config {
        max_daily_debits: 0,
        ..Config::default()
    };
    assert!(matches!(
        LedgerContext::new(config),
        Err(Error::InvalidDebitLimit(0))
    ));
}

// ============================================================================
// CSV Replay
// ============================================================================

#[test]
fn test_replay_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("operations.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "id,type,amount,currency").unwrap();
    writeln!(file, "1,credit,10000,usd").unwrap();
    writeln!(file, "2,debit,2000,").unwrap();
    writeln!(file, "3,credit,5000,USD").unwrap();
    writeln!(file, "4,debit,1000,USD").unwrap();
    writeln!(file, "5,debit,1000,EUR").unwrap();
    writeln!(file, "6,transfer,1000,USD").unwrap();
    drop(file);

    let import = import_operations(&csv_path).unwrap();
    assert_eq!(import.requests.len(), 5);
    assert_eq!(import.skipped.len(), 1);
    assert_eq!(import.skipped[0].line, 7);

    let (context, _) = create_context();
    let mut account = context.open_account(1);
    let summary = replay(&mut account, &import.requests);

    assert_eq!(summary.accepted, 4);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.balance.amount(), 11985);
    assert_eq!(summary.outcomes[4].status, OutcomeStatus::Rejected);
    assert_eq!(summary.outcomes[4].error_kind, Some("incompatible_currency"));
}
