//! Greedy allocation of the balance across scheduled withdrawals
//!
//! Withdrawals are funded earliest date first. Each one takes as much of the
//! remaining balance as it needs before the next is considered:
//!
//! ```text
//! balance 30 | 2024-01-01: 20  -> covered 20 (100%)    balance 10
//!            | 2024-01-05: 15  -> covered 10 (66.67%)  balance 0
//!            | 2024-01-09: 10  -> covered  0 (0%)      balance 0
//! ```
//!
//! Rules applied per withdrawal, in order:
//! - a zero amount withdrawal is skipped and does not appear in the output
//! - a remaining balance of exactly zero covers nothing and leaves the balance as is
//! - otherwise `min(amount, balance)` is covered and subtracted from the balance
//!
//! A negative balance (refunds exceeding deposits) is absorbed by the first
//! non-zero withdrawal: that withdrawal is reported uncovered and the balance
//! is reset to zero.

use crate::types::{Transaction, WithdrawalCoverage};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of `covered_rate`
pub const RATE_DECIMAL_PLACES: u32 = 2;

/// Outcome of an allocation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Coverage per withdrawal, ascending by date
    pub withdrawals: Vec<WithdrawalCoverage>,

    /// Balance left after allocation
    pub remaining: Decimal,
}

/// Percentage of `amount` funded by `covered`, rounded to two decimals
///
/// Midpoints round away from zero (`0.125` becomes `0.13`). A zero `amount`
/// yields a zero rate.
pub fn covered_rate(covered: Decimal, amount: Decimal) -> Decimal {
    if amount.is_zero() {
        return Decimal::ZERO;
    }

    (covered / amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Allocate `balance` across `scheduled` withdrawals in date order
///
/// The sort is stable, so withdrawals sharing a date keep their input order.
pub fn allocate(scheduled: &[&Transaction], balance: Decimal) -> Allocation {
    let mut ordered = scheduled.to_vec();
    ordered.sort_by_key(|withdrawal| withdrawal.date);

    let mut remaining = balance;
    let mut withdrawals = Vec::with_capacity(ordered.len());

    for withdrawal in ordered {
        let amount = withdrawal.amount;
        if amount.is_zero() {
            continue;
        }

        let coverage = if remaining.is_zero() {
            WithdrawalCoverage::uncovered(withdrawal.date, amount)
        } else if remaining.is_sign_negative() {
            remaining = Decimal::ZERO;
            WithdrawalCoverage::uncovered(withdrawal.date, amount)
        } else {
            let covered_amount = amount.min(remaining);
            remaining -= covered_amount;

            WithdrawalCoverage {
                date: withdrawal.date,
                amount,
                covered_amount,
                covered_rate: covered_rate(covered_amount, amount),
            }
        };

        withdrawals.push(coverage);
    }

    Allocation {
        withdrawals,
        remaining,
    }
}
