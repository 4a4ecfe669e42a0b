//! Benchmarks for whole-ledger reports and the balance computation
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Ledgers are generated into a temporary file before each group runs. Each
//! user gets a few deposits, a refund, and a run of scheduled withdrawals
//! spread over the year, so allocation sees partially covered tails.

use balance_engine::cli::{OutputFormat, StrategyType};
use balance_engine::compute_balance;
use balance_engine::strategy::{create_strategy, BatchConfig};
use balance_engine::types::{Transaction, TransactionState, TransactionType};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

const USERS: u32 = 200;

fn main() {
    divan::main();
}

/// Generate `rows` ledger rows spread over `USERS` users
fn generate_ledger(rows: u32) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    (1..=rows)
        .map(|id| {
            let (tx_type, state) = match id % 5 {
                0 | 1 => (TransactionType::Deposit, TransactionState::Completed),
                2 => (TransactionType::Refund, TransactionState::Pending),
                _ => (TransactionType::ScheduledWithdrawal, TransactionState::Scheduled),
            };

            Transaction {
                id,
                user_id: id % USERS + 1,
                tx_type,
                state,
                amount: Decimal::new(i64::from(id % 97 + 1) * 100 + 25, 2),
                date: start + Days::new(u64::from(id * 7 % 365)),
            }
        })
        .collect()
}

fn write_ledger(rows: u32) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut writer = csv::Writer::from_writer(&mut file);
    writer
        .write_record(["id", "user_id", "type", "state", "amount", "date"])
        .unwrap();
    for transaction in generate_ledger(rows) {
        writer
            .write_record([
                transaction.id.to_string(),
                transaction.user_id.to_string(),
                transaction.tx_type.to_string(),
                transaction.state.to_string(),
                transaction.amount.to_string(),
                transaction.date.to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
    drop(writer);
    file.flush().unwrap();
    file
}

#[divan::bench(args = [1_000, 100_000])]
fn sync_report(bencher: divan::Bencher, rows: u32) {
    let ledger = write_ledger(rows);
    let strategy = create_strategy(StrategyType::Sync, None, OutputFormat::Csv);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(ledger.path(), &mut output)
            .expect("Processing failed");
        output
    });
}

#[divan::bench(args = [1_000, 100_000])]
fn async_report(bencher: divan::Bencher, rows: u32) {
    let ledger = write_ledger(rows);
    let strategy = create_strategy(
        StrategyType::Async,
        Some(BatchConfig::default()),
        OutputFormat::Csv,
    );

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(ledger.path(), &mut output)
            .expect("Processing failed");
        output
    });
}

/// Single user history of `len` rows
#[divan::bench(args = [10, 1_000, 10_000])]
fn compute_balance_single_user(bencher: divan::Bencher, len: u32) {
    let history: Vec<Transaction> = generate_ledger(len)
        .into_iter()
        .map(|transaction| Transaction {
            user_id: 1,
            ..transaction
        })
        .collect();

    bencher.bench_local(|| compute_balance(divan::black_box(&history)));
}
