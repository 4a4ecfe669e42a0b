//! Transaction classification
//!
//! Partitions a user's transactions into the four buckets the balance
//! computation works with. Membership is decided by the `(type, state)` pair
//! alone, so the input does not need to be sorted or grouped beforehand.
//!
//! | type                   | state                  | bucket                          |
//! |------------------------|------------------------|---------------------------------|
//! | `deposit`              | `completed`            | `completed_deposits`            |
//! | `scheduled_withdrawal` | `completed`            | `completed_withdrawals`         |
//! | `refund`               | `completed`, `pending` | `completed_or_pending_refunds`  |
//! | `scheduled_withdrawal` | `scheduled`            | `scheduled_withdrawals`         |
//!
//! Every other combination (pending deposits, pending withdrawals, ...) is
//! ignored: it affects neither the balance nor the coverage projection.

use crate::types::{Transaction, TransactionState, TransactionType};

/// The bucket a transaction contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    CompletedDeposits,
    CompletedWithdrawals,
    CompletedOrPendingRefunds,
    ScheduledWithdrawals,
}

impl Bucket {
    /// Bucket for a `(type, state)` pair, or `None` if the pair is not counted
    pub fn of(tx_type: TransactionType, state: TransactionState) -> Option<Bucket> {
        use TransactionState::*;
        use TransactionType::*;

        match (tx_type, state) {
            (Deposit, Completed) => Some(Bucket::CompletedDeposits),
            (ScheduledWithdrawal, Completed) => Some(Bucket::CompletedWithdrawals),
            (Refund, Completed) | (Refund, Pending) => Some(Bucket::CompletedOrPendingRefunds),
            (ScheduledWithdrawal, Scheduled) => Some(Bucket::ScheduledWithdrawals),
            (Deposit, Pending) | (Deposit, Scheduled) => None,
            (Refund, Scheduled) => None,
            (ScheduledWithdrawal, Pending) => None,
        }
    }
}

/// Transactions partitioned by [`Bucket`]
///
/// Each bucket keeps the relative input order of its members.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub completed_deposits: Vec<&'a Transaction>,
    pub completed_withdrawals: Vec<&'a Transaction>,
    pub completed_or_pending_refunds: Vec<&'a Transaction>,
    pub scheduled_withdrawals: Vec<&'a Transaction>,
}

impl<'a> Buckets<'a> {
    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<&'a Transaction> {
        match bucket {
            Bucket::CompletedDeposits => &mut self.completed_deposits,
            Bucket::CompletedWithdrawals => &mut self.completed_withdrawals,
            Bucket::CompletedOrPendingRefunds => &mut self.completed_or_pending_refunds,
            Bucket::ScheduledWithdrawals => &mut self.scheduled_withdrawals,
        }
    }

    /// Number of transactions that landed in any bucket
    pub fn len(&self) -> usize {
        self.completed_deposits.len()
            + self.completed_withdrawals.len()
            + self.completed_or_pending_refunds.len()
            + self.scheduled_withdrawals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `transactions` into buckets
pub fn classify(transactions: &[Transaction]) -> Buckets<'_> {
    let mut buckets = Buckets::default();

    for transaction in transactions {
        if let Some(bucket) = Bucket::of(transaction.tx_type, transaction.state) {
            buckets.bucket_mut(bucket).push(transaction);
        }
    }

    buckets
}
