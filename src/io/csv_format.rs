//! CSV format handling for ledgers, user registries and balance reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for ledger rows (both directions)
//! - Conversion from CSV records to domain types
//! - User registry rows
//! - Balance report serialization
//!
//! All functions are pure (no file handling) for easy testing.
//!
//! # Ledger format
//!
//! ```text
//! id,user_id,type,state,amount,date
//! 1,1,deposit,completed,100.00,2024-01-02
//! 2,1,scheduled_withdrawal,scheduled,40.00,2024-02-01
//! ```

use crate::types::transaction::{parse_amount, parse_date};
use crate::types::{
    Balance, LedgerError, Transaction, TransactionId, TransactionState, TransactionType, UserId,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Header of a ledger CSV file
pub const LEDGER_HEADER: [&str; 6] = ["id", "user_id", "type", "state", "amount", "date"];

/// CSV record structure for ledger rows
///
/// Type, state, amount and date are kept as text so that a bad value in one
/// column produces a precise error message instead of a generic serde one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub id: TransactionId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub state: String,
    pub amount: String,
    pub date: String,
}

impl From<&Transaction> for CsvRecord {
    fn from(transaction: &Transaction) -> Self {
        CsvRecord {
            id: transaction.id,
            user_id: transaction.user_id,
            tx_type: transaction.tx_type.to_string(),
            state: transaction.state.to_string(),
            amount: transaction.amount.to_string(),
            date: transaction.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Row of a user registry CSV file (`user_id` header)
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct UserRecord {
    pub user_id: UserId,
}

/// Convert a CsvRecord to a Transaction
///
/// This function:
/// - Parses the type and state strings into their enums
/// - Parses the amount into a Decimal and rejects negative values
/// - Parses the ISO date
///
/// # Returns
///
/// - Ok(Transaction) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Transaction, String> {
    let context = |e: LedgerError| format!("{} for tx {}", e, csv_record.id);

    let tx_type = csv_record
        .tx_type
        .parse::<TransactionType>()
        .map_err(context)?;
    let state = csv_record
        .state
        .parse::<TransactionState>()
        .map_err(context)?;
    let amount = parse_amount(&csv_record.amount).map_err(context)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!(
            "Negative amount '{}' for tx {}",
            csv_record.amount, csv_record.id
        ));
    }
    let date = parse_date(&csv_record.date).map_err(context)?;

    Ok(Transaction {
        id: csv_record.id,
        user_id: csv_record.user_id,
        tx_type,
        state,
        amount,
        date,
    })
}

/// Write transactions in ledger CSV format
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    // An empty slice still gets a header
    if transactions.is_empty() {
        writer
            .write_record(LEDGER_HEADER)
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;
    }

    for transaction in transactions {
        writer
            .serialize(CsvRecord::from(transaction))
            .map_err(|e| format!("Failed to write transaction record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Format a monetary value with two decimals
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Write a per-user balance summary in CSV format
///
/// Writes columns: user, balance, withdrawals, requested, covered.
/// Rows are sorted by user ID for deterministic output.
pub fn write_balances_csv(
    balances: &[(UserId, Balance)],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["user", "balance", "withdrawals", "requested", "covered"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted: Vec<&(UserId, Balance)> = balances.iter().collect();
    sorted.sort_by_key(|(user, _)| *user);

    for (user, balance) in sorted {
        writer
            .write_record(&[
                user.to_string(),
                format_money(balance.balance),
                balance.withdrawals.len().to_string(),
                format_money(balance.requested()),
                format_money(balance.covered()),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
