//! In-memory transaction storage
//!
//! This module provides the `MemoryStore`, a fixture-friendly implementation of
//! the storage traits. It can be seeded from records in code or loaded from a
//! ledger CSV plus an optional user registry CSV.
//!
//! # Identifiers
//!
//! New rows get `max(existing id) + 1`, starting at 1 for an empty store.
//! Once `u32::MAX` is taken, `put` fails with `TransactionIdsExhausted`.
//!
//! # Duplicate Handling
//!
//! When seeding, only the first occurrence of a transaction ID is kept.
//! Subsequent records with the same ID are ignored, and so are their users
//! unless another kept row or the registry names them. `put` never replaces
//! a stored row.

use crate::core::traits::{check_table, TransactionStore, UserRegistry};
use crate::io::sync_reader::{read_users, SyncReader};
use crate::types::{LedgerError, Transaction, TransactionId, TransactionRow, UserId};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// In-memory store for transactions and known users
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Transactions ordered by ID
    transactions: BTreeMap<TransactionId, Transaction>,

    /// Users known to the ledger
    users: BTreeSet<UserId>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `transactions` and extra `users`
    ///
    /// Every user owning a transaction is registered as well.
    pub fn from_records(
        transactions: impl IntoIterator<Item = Transaction>,
        users: impl IntoIterator<Item = UserId>,
    ) -> Self {
        let mut store = Self::new();
        for transaction in transactions {
            store.insert(transaction);
        }
        store.users.extend(users);
        store
    }

    /// Load a store from a ledger CSV and an optional user registry CSV
    ///
    /// Malformed ledger rows are logged and skipped. A missing or malformed
    /// user registry is an error.
    pub fn load(ledger: &Path, users: Option<&Path>) -> Result<Self, LedgerError> {
        let reader = SyncReader::new(ledger).map_err(|_| LedgerError::FileNotFound {
            path: ledger.display().to_string(),
        })?;

        let mut store = Self::new();
        for result in reader {
            match result {
                Ok(transaction) => store.insert(transaction),
                Err(e) => warn!("Skipping ledger row: {}", e),
            }
        }

        if let Some(path) = users {
            let known = read_users(path).map_err(|message| LedgerError::IoError { message })?;
            store.users.extend(known);
        }

        debug!(
            transactions = store.transactions.len(),
            users = store.users.len(),
            ledger = %ledger.display(),
            "loaded ledger"
        );

        Ok(store)
    }

    /// Insert a transaction that already carries its ID
    ///
    /// A duplicate ID is ignored. The user is registered only when the row
    /// is kept.
    fn insert(&mut self, transaction: Transaction) {
        if self.transactions.contains_key(&transaction.id) {
            warn!(id = transaction.id, "Duplicate transaction id ignored");
            return;
        }
        self.users.insert(transaction.user_id);
        self.transactions.insert(transaction.id, transaction);
    }

    /// Identifier the next `put` will assign
    pub fn next_id(&self) -> Result<TransactionId, LedgerError> {
        match self.transactions.keys().next_back() {
            None => Ok(1),
            Some(&last) => last
                .checked_add(1)
                .ok_or(LedgerError::TransactionIdsExhausted { last }),
        }
    }

    /// Store a transaction, refusing to replace a row with the same ID
    pub(crate) fn insert_new(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        match self.transactions.entry(transaction.id) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_transaction(transaction.id)),
            Entry::Vacant(slot) => {
                slot.insert(transaction);
                Ok(())
            }
        }
    }

    /// Known users in ascending order
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TransactionStore for MemoryStore {
    fn scan(&self, table: &str) -> Result<Vec<Transaction>, LedgerError> {
        check_table(table)?;
        Ok(self.transactions.values().cloned().collect())
    }

    fn get(&self, table: &str, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        check_table(table)?;
        Ok(self.transactions.get(&id).cloned())
    }

    fn put(&mut self, table: &str, row: TransactionRow) -> Result<Transaction, LedgerError> {
        check_table(table)?;
        let transaction = row.with_id(self.next_id()?);
        self.insert_new(transaction.clone())?;
        Ok(transaction)
    }
}

impl UserRegistry for MemoryStore {
    fn contains_user(&self, user: UserId) -> Result<bool, LedgerError> {
        Ok(self.users.contains(&user))
    }

    fn register_user(&mut self, user: UserId) -> Result<(), LedgerError> {
        self.users.insert(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::TRANSACTIONS_TABLE;
    use crate::types::{TransactionState, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn row(user_id: UserId, amount: i64) -> TransactionRow {
        TransactionRow {
            user_id,
            tx_type: TransactionType::Deposit,
            state: TransactionState::Pending,
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_put_assigns_sequential_ids() {
        let mut store = MemoryStore::new();

        let first = store.put(TRANSACTIONS_TABLE, row(1, 10)).unwrap();
        let second = store.put(TRANSACTIONS_TABLE, row(2, 20)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_put_continues_after_seeded_ids() {
        let seeded = row(1, 10).with_id(41);
        let mut store = MemoryStore::from_records(vec![seeded], vec![]);

        let created = store.put(TRANSACTIONS_TABLE, row(1, 5)).unwrap();
        assert_eq!(created.id, 42);
    }

    #[test]
    fn test_get_and_scan() {
        let mut store = MemoryStore::new();
        let created = store.put(TRANSACTIONS_TABLE, row(3, 10)).unwrap();

        assert_eq!(
            store.get(TRANSACTIONS_TABLE, created.id).unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.get(TRANSACTIONS_TABLE, 999).unwrap(), None);
        assert_eq!(store.scan(TRANSACTIONS_TABLE).unwrap(), vec![created]);
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let mut store = MemoryStore::new();

        assert!(matches!(
            store.scan("balances"),
            Err(LedgerError::UnknownTable { .. })
        ));
        assert!(store.get("balances", 1).is_err());
        assert!(store.put("balances", row(1, 1)).is_err());
    }

    #[test]
    fn test_duplicate_seed_first_wins() {
        let store = MemoryStore::from_records(
            vec![row(1, 10).with_id(1), row(2, 99).with_id(1)],
            vec![],
        );

        let kept = store.get(TRANSACTIONS_TABLE, 1).unwrap().unwrap();
        assert_eq!(kept.user_id, 1);
        assert_eq!(kept.amount, Decimal::from(10));
    }

    #[test]
    fn test_put_fails_once_ids_are_exhausted() {
        let mut store = MemoryStore::from_records(vec![row(1, 10).with_id(u32::MAX)], vec![]);

        let result = store.put(TRANSACTIONS_TABLE, row(2, 5));

        assert_eq!(
            result,
            Err(LedgerError::TransactionIdsExhausted { last: u32::MAX })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(TRANSACTIONS_TABLE, u32::MAX).unwrap().unwrap().user_id,
            1
        );
    }

    #[test]
    fn test_put_after_max_id_keeps_row_zero() {
        let mut store = MemoryStore::from_records(
            vec![row(7, 70).with_id(0), row(1, 10).with_id(u32::MAX)],
            vec![],
        );

        assert!(store.put(TRANSACTIONS_TABLE, row(2, 5)).is_err());

        let zero = store.get(TRANSACTIONS_TABLE, 0).unwrap().unwrap();
        assert_eq!(zero.user_id, 7);
        assert_eq!(zero.amount, Decimal::from(70));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_dropped_duplicate_does_not_register_its_user() {
        let store = MemoryStore::from_records(
            vec![row(1, 10).with_id(1), row(9, 99).with_id(1)],
            vec![],
        );

        assert!(store.contains_user(1).unwrap());
        assert!(!store.contains_user(9).unwrap());
    }

    #[test]
    fn test_insert_new_refuses_taken_id() {
        let mut store = MemoryStore::from_records(vec![row(1, 10).with_id(3)], vec![]);

        let result = store.insert_new(row(2, 20).with_id(3));

        assert_eq!(result, Err(LedgerError::DuplicateTransaction { tx: 3 }));
        assert_eq!(store.get(TRANSACTIONS_TABLE, 3).unwrap().unwrap().user_id, 1);
    }

    #[test]
    fn test_user_registry() {
        let mut store = MemoryStore::from_records(vec![row(1, 10).with_id(1)], vec![4]);

        assert!(store.contains_user(1).unwrap());
        assert!(store.contains_user(4).unwrap());
        assert!(!store.contains_user(10).unwrap());

        store.register_user(10).unwrap();
        assert!(store.contains_user(10).unwrap());
        assert_eq!(store.users().collect::<Vec<_>>(), vec![1, 4, 10]);
    }

    #[test]
    fn test_load_from_files() {
        let ledger = create_temp_csv(
            "id,user_id,type,state,amount,date\n\
             1,1,deposit,completed,10,2024-01-01\n\
             2,2,bogus,completed,10,2024-01-01\n\
             3,2,refund,pending,4,2024-01-02\n",
        );
        let users = create_temp_csv("user_id\n4\n");

        let store = MemoryStore::load(ledger.path(), Some(users.path())).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id().unwrap(), 4);
        assert_eq!(store.users().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_load_missing_ledger() {
        let result = MemoryStore::load(Path::new("missing/ledger.csv"), None);
        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }
}
