//! File-backed transaction storage
//!
//! A ledger directory holds two CSV files:
//!
//! - `transactions.csv` - ledger rows (`id,user_id,type,state,amount,date`)
//! - `users.csv` - user registry (`user_id`)
//!
//! Both are loaded into a [`MemoryStore`] index on open. Writes append a row
//! to the matching file before the index is updated, so a failed write leaves
//! the store unchanged.
//!
//! [`FileStore::open`] creates a missing ledger; [`FileStore::open_existing`]
//! never touches the filesystem and fails on a missing one.

use crate::core::memory_store::MemoryStore;
use crate::core::traits::{check_table, TransactionStore, UserRegistry};
use crate::io::csv_format::{CsvRecord, UserRecord, LEDGER_HEADER};
use crate::types::{LedgerError, Transaction, TransactionId, TransactionRow, UserId};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// Ledger file name inside a ledger directory
pub const TRANSACTIONS_FILE: &str = "transactions.csv";

/// User registry file name inside a ledger directory
pub const USERS_FILE: &str = "users.csv";

/// Persistent store backed by a ledger directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    index: MemoryStore,
}

impl FileStore {
    /// Open the ledger directory at `dir`, creating it and its files if needed
    pub fn open(dir: &Path) -> Result<Self, LedgerError> {
        fs::create_dir_all(dir)?;

        let ledger = dir.join(TRANSACTIONS_FILE);
        if !ledger.exists() {
            fs::write(&ledger, format!("{}\n", LEDGER_HEADER.join(",")))?;
            info!(path = %ledger.display(), "created ledger file");
        }

        let users = dir.join(USERS_FILE);
        if !users.exists() {
            fs::write(&users, "user_id\n")?;
        }

        let index = MemoryStore::load(&ledger, Some(&users))?;

        Ok(FileStore {
            dir: dir.to_path_buf(),
            index,
        })
    }

    /// Open an existing ledger directory without creating anything
    ///
    /// Fails with `FileNotFound` when the directory or either ledger file is
    /// missing.
    pub fn open_existing(dir: &Path) -> Result<Self, LedgerError> {
        let ledger = dir.join(TRANSACTIONS_FILE);
        let users = dir.join(USERS_FILE);

        for path in [dir, ledger.as_path(), users.as_path()] {
            if !path.exists() {
                return Err(LedgerError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
        }

        let index = MemoryStore::load(&ledger, Some(&users))?;

        Ok(FileStore {
            dir: dir.to_path_buf(),
            index,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn append<T: Serialize>(&self, file_name: &str, record: &T) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .append(true)
            .open(self.dir.join(file_name))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }
}

impl TransactionStore for FileStore {
    fn scan(&self, table: &str) -> Result<Vec<Transaction>, LedgerError> {
        self.index.scan(table)
    }

    fn get(&self, table: &str, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        self.index.get(table, id)
    }

    fn put(&mut self, table: &str, row: TransactionRow) -> Result<Transaction, LedgerError> {
        check_table(table)?;

        let transaction = row.with_id(self.index.next_id()?);
        if self.index.get(table, transaction.id)?.is_some() {
            return Err(LedgerError::duplicate_transaction(transaction.id));
        }

        self.append(TRANSACTIONS_FILE, &CsvRecord::from(&transaction))?;
        self.index.insert_new(transaction.clone())?;

        Ok(transaction)
    }
}

impl UserRegistry for FileStore {
    fn contains_user(&self, user: UserId) -> Result<bool, LedgerError> {
        self.index.contains_user(user)
    }

    fn register_user(&mut self, user: UserId) -> Result<(), LedgerError> {
        if self.index.contains_user(user)? {
            return Ok(());
        }

        self.append(USERS_FILE, &UserRecord { user_id: user })?;
        self.index.register_user(user)
    }
}
