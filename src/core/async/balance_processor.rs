//! Per-user partitioning and concurrent balance computation
//!
//! ```text
//! BalanceProcessor
//!     ├── Arc<DashMap<UserId, Vec<Transaction>>>  (histories, filled batch by batch)
//!     └── Arc<DashMap<UserId, Balance>>           (results, one task per user)
//! ```
//!
//! Batches must be ingested in input order: a user's history keeps the order
//! in which its rows were read, which decides the order of withdrawals that
//! share a date.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error};

use crate::core::engine::compute_balance;
use crate::types::{Balance, Transaction, UserId};

/// Collects user histories and computes their balances concurrently
#[derive(Debug, Clone, Default)]
pub struct BalanceProcessor {
    histories: Arc<DashMap<UserId, Vec<Transaction>>>,
    balances: Arc<DashMap<UserId, Balance>>,
}

impl BalanceProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition a batch by user ID
    ///
    /// Each user's transactions keep their relative order from the batch.
    pub fn partition_by_user(batch: Vec<Transaction>) -> HashMap<UserId, Vec<Transaction>> {
        let mut user_batches: HashMap<UserId, Vec<Transaction>> = HashMap::new();

        for transaction in batch {
            user_batches
                .entry(transaction.user_id)
                .or_default()
                .push(transaction);
        }

        user_batches
    }

    /// Append a batch to the collected histories
    pub fn ingest(&self, batch: Vec<Transaction>) {
        for (user, transactions) in Self::partition_by_user(batch) {
            self.histories.entry(user).or_default().extend(transactions);
        }
    }

    /// Number of users with a collected history that is not computed yet
    pub fn pending_users(&self) -> usize {
        self.histories.len()
    }

    /// Compute the balance of a single user from its collected history
    ///
    /// The history is consumed; a user without history gets an empty balance.
    pub fn compute_user(&self, user: UserId) {
        let history = self
            .histories
            .remove(&user)
            .map(|(_, transactions)| transactions)
            .unwrap_or_default();

        self.balances.insert(user, compute_balance(&history));
    }

    /// Compute the balances of all collected users, one tokio task per user
    ///
    /// Returns the number of users computed.
    pub async fn compute_all(&self) -> usize {
        let users: Vec<UserId> = self.histories.iter().map(|entry| *entry.key()).collect();

        let mut tasks = Vec::with_capacity(users.len());
        for user in users {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move { processor.compute_user(user) }));
        }

        let mut computed = 0;
        for task in tasks {
            match task.await {
                Ok(()) => computed += 1,
                Err(e) => error!("Balance task panicked: {:?}", e),
            }
        }

        debug!(users = computed, "computed balances");
        computed
    }

    /// Computed balances sorted by user ID
    pub fn balances(&self) -> Vec<(UserId, Balance)> {
        let mut balances: Vec<(UserId, Balance)> = self
            .balances
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        balances.sort_by_key(|(user, _)| *user);
        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionState, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(id: u32, user_id: UserId, tx_type: TransactionType, state: TransactionState, amount: i64) -> Transaction {
        Transaction {
            id,
            user_id,
            tx_type,
            state,
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn deposit(id: u32, user_id: UserId, amount: i64) -> Transaction {
        tx(id, user_id, TransactionType::Deposit, TransactionState::Completed, amount)
    }

    fn scheduled(id: u32, user_id: UserId, amount: i64) -> Transaction {
        tx(id, user_id, TransactionType::ScheduledWithdrawal, TransactionState::Scheduled, amount)
    }

    #[test]
    fn test_partition_by_user_empty_batch() {
        assert!(BalanceProcessor::partition_by_user(vec![]).is_empty());
    }

    #[test]
    fn test_partition_by_user_maintains_order() {
        let batch = vec![deposit(1, 1, 10), deposit(2, 2, 10), deposit(3, 1, 10), deposit(4, 3, 10)];

        let partitioned = BalanceProcessor::partition_by_user(batch);

        assert_eq!(partitioned.len(), 3);
        let ids: Vec<u32> = partitioned[&1].iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(partitioned[&2].len(), 1);
        assert_eq!(partitioned[&3][0].id, 4);
    }

    #[test]
    fn test_ingest_keeps_history_order_across_batches() {
        let processor = BalanceProcessor::new();

        // Same date: the earlier row must be funded first
        processor.ingest(vec![deposit(1, 1, 10), scheduled(2, 1, 10)]);
        processor.ingest(vec![scheduled(3, 1, 5)]);
        processor.compute_user(1);

        let balances = processor.balances();
        let withdrawals = &balances[0].1.withdrawals;
        assert_eq!(withdrawals[0].amount, Decimal::from(10));
        assert_eq!(withdrawals[0].covered_amount, Decimal::from(10));
        assert_eq!(withdrawals[1].amount, Decimal::from(5));
        assert_eq!(withdrawals[1].covered_amount, Decimal::ZERO);
    }

    #[test]
    fn test_compute_user_without_history() {
        let processor = BalanceProcessor::new();
        processor.compute_user(42);
        assert_eq!(processor.balances(), vec![(42, Balance::empty())]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_compute_all_users() {
        let processor = BalanceProcessor::new();
        let mut batch = Vec::new();
        for user in 1..=20u32 {
            batch.push(deposit(user * 10, user, i64::from(user)));
            batch.push(scheduled(user * 10 + 1, user, 10));
        }
        processor.ingest(batch);
        assert_eq!(processor.pending_users(), 20);

        let computed = processor.compute_all().await;

        assert_eq!(computed, 20);
        assert_eq!(processor.pending_users(), 0);
        let balances = processor.balances();
        assert_eq!(balances.len(), 20);
        for (user, balance) in balances {
            let expected_remaining = (i64::from(user) - 10).max(0);
            assert_eq!(balance.balance, Decimal::from(expected_remaining));
            assert_eq!(
                balance.withdrawals[0].covered_amount,
                Decimal::from(i64::from(user).min(10))
            );
        }
    }
}
