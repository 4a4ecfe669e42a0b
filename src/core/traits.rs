//! Storage collaborator traits
//!
//! The balance engine itself never touches storage. The service layer talks to
//! storage through these traits only, so any store (in-memory fixtures, files
//! on disk, ...) can back it.

use crate::types::{LedgerError, Transaction, TransactionId, TransactionRow, UserId};

/// Name of the table holding transactions
pub const TRANSACTIONS_TABLE: &str = "transactions";

/// Key/record store for transactions, addressed by table name
///
/// Every operation on a table other than [`TRANSACTIONS_TABLE`] fails with
/// [`LedgerError::UnknownTable`].
pub trait TransactionStore {
    /// Full snapshot of a table
    fn scan(&self, table: &str) -> Result<Vec<Transaction>, LedgerError>;

    /// Point lookup by identifier
    fn get(&self, table: &str, id: TransactionId) -> Result<Option<Transaction>, LedgerError>;

    /// Insert a row and return it with its assigned identifier
    fn put(&mut self, table: &str, row: TransactionRow) -> Result<Transaction, LedgerError>;
}

/// Registry of known users
///
/// A user is known once registered, even without any transactions. This is
/// what tells a user with an empty history apart from an unknown user.
pub trait UserRegistry {
    fn contains_user(&self, user: UserId) -> Result<bool, LedgerError>;

    /// Register a user; registering a known user is a no-op
    fn register_user(&mut self, user: UserId) -> Result<(), LedgerError>;
}

/// Reject any table name other than [`TRANSACTIONS_TABLE`]
pub(crate) fn check_table(table: &str) -> Result<(), LedgerError> {
    if table == TRANSACTIONS_TABLE {
        Ok(())
    } else {
        Err(LedgerError::unknown_table(table))
    }
}
