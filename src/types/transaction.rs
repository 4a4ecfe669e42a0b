//! Transaction-related types for the Balance Engine
//!
//! This module defines transaction types, lifecycle states, stored transaction
//! rows and the creation payload used by the service layer.

use super::error::LedgerError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User identifier
pub type UserId = u32;

/// Transaction identifier
///
/// Assigned by the storage layer when a transaction is created.
pub type TransactionId = u32;

/// Transaction types tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming into the user's balance
    Deposit,

    /// Money returned from the user's balance
    ///
    /// Refunds count against the balance as soon as they are pending.
    Refund,

    /// A future-dated debit request against the user's balance
    ScheduledWithdrawal,
}

impl TransactionType {
    /// State a freshly created transaction of this type starts in
    ///
    /// Deposits and refunds start out pending; scheduled withdrawals start
    /// out scheduled.
    pub fn initial_state(self) -> TransactionState {
        match self {
            TransactionType::Deposit | TransactionType::Refund => TransactionState::Pending,
            TransactionType::ScheduledWithdrawal => TransactionState::Scheduled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Refund => "refund",
            TransactionType::ScheduledWithdrawal => "scheduled_withdrawal",
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "refund" => Ok(TransactionType::Refund),
            "scheduled_withdrawal" => Ok(TransactionType::ScheduledWithdrawal),
            _ => Err(LedgerError::invalid_transaction_type(s)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Created but not yet settled
    Pending,

    /// Waiting for its execution date (scheduled withdrawals only)
    Scheduled,

    /// Settled money movement
    Completed,
}

impl TransactionState {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionState::Pending => "pending",
            TransactionState::Scheduled => "scheduled",
            TransactionState::Completed => "completed",
        }
    }
}

impl FromStr for TransactionState {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TransactionState::Pending),
            "scheduled" => Ok(TransactionState::Scheduled),
            "completed" => Ok(TransactionState::Completed),
            _ => Err(LedgerError::invalid_transaction_state(s)),
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored transaction
///
/// Owned by the storage collaborator; the balance engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the store
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub user_id: UserId,

    /// The kind of money movement
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Current lifecycle state
    pub state: TransactionState,

    /// Non-negative amount
    pub amount: Decimal,

    /// Calendar date of the transaction
    pub date: NaiveDate,
}

/// A transaction row that has not been assigned an identifier yet
///
/// This is what the service hands to [`TransactionStore::put`](crate::core::traits::TransactionStore::put).
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub user_id: UserId,
    pub tx_type: TransactionType,
    pub state: TransactionState,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl TransactionRow {
    /// Attach a store-assigned identifier
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            tx_type: self.tx_type,
            state: self.state,
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Payload for creating a transaction
///
/// The state is not part of the payload; it is derived from the type via
/// [`TransactionType::initial_state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Build a creation payload from raw text fields
    ///
    /// # Errors
    ///
    /// - `InvalidTransactionType` if `tx_type` is not a known type
    /// - `InvalidAmount` if `amount` is not a decimal or is negative
    /// - `InvalidDate` if `date` is not an ISO `YYYY-MM-DD` date
    pub fn parse(tx_type: &str, amount: &str, date: &str) -> Result<Self, LedgerError> {
        let tx_type = tx_type.parse::<TransactionType>()?;
        let amount = parse_amount(amount)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(LedgerError::invalid_amount(amount.to_string()));
        }
        let date = parse_date(date)?;

        Ok(NewTransaction {
            tx_type,
            amount,
            date,
        })
    }

    /// Turn the payload into a storable row for `user_id`
    pub fn into_row(self, user_id: UserId) -> TransactionRow {
        TransactionRow {
            user_id,
            tx_type: self.tx_type,
            state: self.tx_type.initial_state(),
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Largest accepted amount, in whole units
///
/// Keeps every ledger sum far away from `Decimal::MAX`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Parse a decimal amount, ignoring surrounding whitespace
///
/// Magnitudes above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| LedgerError::invalid_amount(raw))?;
    if amount.abs() > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::invalid_amount(raw));
    }
    Ok(amount)
}

/// Parse an ISO `YYYY-MM-DD` date, ignoring surrounding whitespace
pub fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| LedgerError::invalid_date(raw))
}
