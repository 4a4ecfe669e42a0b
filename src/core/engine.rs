//! Balance computation
//!
//! This module provides [`compute_balance`], the single entry point of the
//! balance engine. It runs the three steps in sequence:
//!
//! 1. [`classify`](crate::core::classifier::classify) the transactions into buckets
//! 2. sum the buckets into a signed [`net_balance`](crate::core::aggregator::net_balance)
//! 3. [`allocate`](crate::core::allocator::allocate) that balance across the
//!    scheduled withdrawals, earliest first
//!
//! The computation is pure: it performs no I/O and keeps no state between
//! calls, so the same snapshot always yields the same [`Balance`].

use crate::core::aggregator::net_balance;
use crate::core::allocator::allocate;
use crate::core::classifier::classify;
use crate::types::{Balance, Transaction};
use tracing::debug;

/// Compute the balance and withdrawal coverage for a user's transactions
///
/// `transactions` is expected to hold a single user's full history, in any
/// order. An empty history yields a zero balance without any withdrawals.
pub fn compute_balance(transactions: &[Transaction]) -> Balance {
    if transactions.is_empty() {
        return Balance::empty();
    }

    let buckets = classify(transactions);
    let net = net_balance(&buckets);
    let allocation = allocate(&buckets.scheduled_withdrawals, net);

    debug!(
        transactions = transactions.len(),
        counted = buckets.len(),
        net_balance = %net,
        remaining = %allocation.remaining,
        withdrawals = allocation.withdrawals.len(),
        "computed balance"
    );

    Balance {
        balance: allocation.remaining,
        withdrawals: allocation.withdrawals,
    }
}
