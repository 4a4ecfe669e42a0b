//! Error types for the Balance Engine
//!
//! This module defines all error types that can occur while loading ledgers,
//! creating transactions and answering balance queries.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Input Errors**: Unknown transaction types or states, bad amounts or dates
//! - **Lookup Errors**: Unknown users, unknown transactions, unknown tables
//!
//! Balance computation itself never fails: zero balances, empty histories and
//! partially covered withdrawals are all regular outcomes.

use thiserror::Error;

/// Main error type for the balance engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// When loading a ledger this is recoverable: the malformed record is
    /// skipped and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unrecognised transaction type
    ///
    /// Raised at creation time, before anything reaches storage.
    #[error("Invalid transaction type '{tx_type}'")]
    InvalidTransactionType {
        /// The invalid transaction type string
        tx_type: String,
    },

    /// Unrecognised transaction state
    #[error("Invalid transaction state '{state}'")]
    InvalidTransactionState {
        /// The invalid state string
        state: String,
    },

    /// Invalid amount value (negative or malformed)
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
    },

    /// Invalid date value (expected `YYYY-MM-DD`)
    #[error("Invalid date '{date}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The invalid date string
        date: String,
    },

    /// The storage layer has no table with this name
    #[error("Unknown table '{table}'")]
    UnknownTable {
        /// Requested table name
        table: String,
    },

    /// The user has no history in the ledger
    #[error("User {user} not found")]
    UserNotFound {
        /// User ID that was not found
        user: u32,
    },

    /// A row with this transaction ID is already stored
    ///
    /// Stores never overwrite an existing row.
    #[error("Duplicate transaction ID {tx}")]
    DuplicateTransaction {
        /// Transaction ID that is already taken
        tx: u32,
    },

    /// Every transaction ID up to `u32::MAX` is taken
    #[error("Transaction IDs exhausted after {last}")]
    TransactionIdsExhausted {
        /// Highest ID in the store
        last: u32,
    },

    /// The transaction does not exist or belongs to another user
    #[error("Transaction {tx} not found for user {user}")]
    TransactionNotFound {
        /// Transaction ID that was not found
        tx: u32,
        /// User ID that requested it
        user: u32,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidTransactionType error
    pub fn invalid_transaction_type(tx_type: &str) -> Self {
        LedgerError::InvalidTransactionType {
            tx_type: tx_type.to_string(),
        }
    }

    /// Create an InvalidTransactionState error
    pub fn invalid_transaction_state(state: &str) -> Self {
        LedgerError::InvalidTransactionState {
            state: state.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl Into<String>) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(date: &str) -> Self {
        LedgerError::InvalidDate {
            date: date.to_string(),
        }
    }

    /// Create an UnknownTable error
    pub fn unknown_table(table: &str) -> Self {
        LedgerError::UnknownTable {
            table: table.to_string(),
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user: u32) -> Self {
        LedgerError::UserNotFound { user }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(tx: u32, user: u32) -> Self {
        LedgerError::TransactionNotFound { tx, user }
    }

    /// Create a DuplicateTransaction error
    pub fn duplicate_transaction(tx: u32) -> Self {
        LedgerError::DuplicateTransaction { tx }
    }
}
