//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction types, states, rows and identifiers
//! - `balance`: Balance computation output
//! - `error`: Error types for the balance engine

pub mod balance;
pub mod error;
pub mod transaction;

pub use balance::{Balance, WithdrawalCoverage};
pub use error::LedgerError;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionRow, TransactionState, TransactionType,
    UserId,
};
