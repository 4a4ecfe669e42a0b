//! Net balance aggregation
//!
//! `net = completed deposits - completed withdrawals - completed or pending refunds`
//!
//! The result is not clamped and may be negative. Sums saturate at the
//! `Decimal` range instead of overflowing.

use crate::core::classifier::Buckets;
use crate::types::Transaction;
use rust_decimal::Decimal;

fn total(transactions: &[&Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount))
}

/// Signed net balance of the classified transactions
pub fn net_balance(buckets: &Buckets<'_>) -> Decimal {
    total(&buckets.completed_deposits)
        .saturating_sub(total(&buckets.completed_withdrawals))
        .saturating_sub(total(&buckets.completed_or_pending_refunds))
}
