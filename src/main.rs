//! Balance Engine CLI
//!
//! # Usage
//!
//! ```bash
//! balance-engine report ledger.csv > balances.csv
//! balance-engine report --strategy async --format json ledger.csv
//! balance-engine balance --ledger data --user 7
//! balance-engine list --ledger data --user 7
//! balance-engine show --ledger data --user 7 --id 12
//! balance-engine create --ledger data --user 7 --type deposit --amount 25.00 --date 2024-05-01
//! ```
//!
//! `report` works on a single ledger CSV file. The other commands work on a
//! ledger directory (see `FileStore`). Only `create` initializes a missing
//! one; the read commands fail with "File not found" instead.
//! Results go to stdout, logs go to stderr (`RUST_LOG` selects the level,
//! `warn` by default).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unknown user or transaction, invalid input, file not readable, etc.)

use balance_engine::cli::{self, Command, ReportArgs, StrategyType};
use balance_engine::core::{FileStore, LedgerService};
use balance_engine::io::{write_json, write_transactions_csv};
use balance_engine::strategy;
use balance_engine::types::{LedgerError, NewTransaction};
use std::io::Write;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = run(args.command, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command, output: &mut dyn Write) -> Result<(), String> {
    match command {
        Command::Report(report) => run_report(&report, output),
        Command::Balance { ledger, user } => {
            let service = LedgerService::new(open_ledger(&ledger)?);
            let balance = service
                .user_balance(user)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| LedgerError::user_not_found(user).to_string())?;
            write_json(&balance, output)
        }
        Command::List { ledger, user } => {
            let service = LedgerService::new(open_ledger(&ledger)?);
            let transactions = service.transactions(user).map_err(|e| e.to_string())?;
            write_transactions_csv(&transactions, output)
        }
        Command::Show { ledger, user, id } => {
            let service = LedgerService::new(open_ledger(&ledger)?);
            let transaction = service
                .transaction(user, id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| LedgerError::transaction_not_found(id, user).to_string())?;
            write_json(&transaction, output)
        }
        Command::Create {
            ledger,
            user,
            tx_type,
            amount,
            date,
        } => {
            // Validate before the ledger directory is touched
            let new_transaction =
                NewTransaction::parse(&tx_type, &amount, &date).map_err(|e| e.to_string())?;

            let mut service = LedgerService::new(create_ledger(&ledger)?);
            let created = service
                .create_transaction(user, new_transaction)
                .map_err(|e| e.to_string())?;
            write_json(&created, output)
        }
    }
}

fn run_report(report: &ReportArgs, output: &mut dyn Write) -> Result<(), String> {
    let config = match report.strategy {
        StrategyType::Async => Some(report.to_batch_config()),
        StrategyType::Sync => None,
    };

    let strategy = strategy::create_strategy(report.strategy, config, report.format);
    strategy.process(&report.input_file, output)
}

fn open_ledger(ledger: &Path) -> Result<FileStore, String> {
    FileStore::open_existing(ledger).map_err(|e| e.to_string())
}

fn create_ledger(ledger: &Path) -> Result<FileStore, String> {
    FileStore::open(ledger).map_err(|e| e.to_string())
}
