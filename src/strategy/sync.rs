//! Synchronous processing strategy
//!
//! Streams the ledger through `SyncReader`, groups rows by user and computes
//! each user's balance on the calling thread.

use crate::cli::OutputFormat;
use crate::core::compute_balance;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_report, ProcessingStrategy};
use crate::types::{Balance, Transaction, UserId};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    format: OutputFormat,
}

impl SyncProcessingStrategy {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Malformed rows are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;

        let mut histories: BTreeMap<UserId, Vec<Transaction>> = BTreeMap::new();
        for result in reader {
            match result {
                Ok(transaction) => histories
                    .entry(transaction.user_id)
                    .or_default()
                    .push(transaction),
                Err(e) => warn!("CSV parsing error: {}", e),
            }
        }

        let balances: Vec<(UserId, Balance)> = histories
            .iter()
            .map(|(user, history)| (*user, compute_balance(history)))
            .collect();

        debug!(users = balances.len(), "computed balances");

        write_report(self.format, &balances, output)
    }
}
