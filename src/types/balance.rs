//! Balance-related types for the Balance Engine
//!
//! This module defines the output of a balance computation: the user's
//! remaining balance and the coverage of each pending scheduled withdrawal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coverage of a single scheduled withdrawal
///
/// Describes how much of the withdrawal the user's balance can fund at
/// computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalCoverage {
    /// Date the withdrawal is scheduled for
    pub date: NaiveDate,

    /// Requested withdrawal amount
    pub amount: Decimal,

    /// Portion of the balance applied to this withdrawal
    ///
    /// Always within `0..=amount`.
    pub covered_amount: Decimal,

    /// `covered_amount / amount * 100`, rounded to two decimal places
    pub covered_rate: Decimal,
}

impl WithdrawalCoverage {
    /// Coverage entry for a withdrawal that receives no funds
    pub fn uncovered(date: NaiveDate, amount: Decimal) -> Self {
        WithdrawalCoverage {
            date,
            amount,
            covered_amount: Decimal::ZERO,
            covered_rate: Decimal::ZERO,
        }
    }

    pub fn is_fully_covered(&self) -> bool {
        self.covered_amount == self.amount
    }
}

/// Result of a balance computation
///
/// `balance` is what is left after funds were allocated to the scheduled
/// withdrawals. `withdrawals` is ordered by ascending date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub balance: Decimal,
    pub withdrawals: Vec<WithdrawalCoverage>,
}

impl Balance {
    /// Balance of a user without any transactions
    pub fn empty() -> Self {
        Balance {
            balance: Decimal::ZERO,
            withdrawals: Vec::new(),
        }
    }

    /// Sum of all requested withdrawal amounts
    pub fn requested(&self) -> Decimal {
        self.withdrawals.iter().map(|w| w.amount).sum()
    }

    /// Sum of all covered withdrawal amounts
    pub fn covered(&self) -> Decimal {
        self.withdrawals.iter().map(|w| w.covered_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_empty_balance() {
        let balance = Balance::empty();
        assert!(balance.balance.is_zero());
        assert!(balance.withdrawals.is_empty());
        assert_eq!(balance, Balance::default());
    }

    #[test]
    fn test_requested_and_covered_totals() {
        let balance = Balance {
            balance: Decimal::ZERO,
            withdrawals: vec![
                WithdrawalCoverage {
                    date: date(1),
                    amount: Decimal::from(10),
                    covered_amount: Decimal::from(10),
                    covered_rate: Decimal::from(100),
                },
                WithdrawalCoverage::uncovered(date(2), Decimal::from(5)),
            ],
        };

        assert_eq!(balance.requested(), Decimal::from(15));
        assert_eq!(balance.covered(), Decimal::from(10));
        assert!(balance.withdrawals[0].is_fully_covered());
        assert!(!balance.withdrawals[1].is_fully_covered());
    }

    #[test]
    fn test_balance_json_shape() {
        let balance = Balance {
            balance: Decimal::from(40),
            withdrawals: vec![WithdrawalCoverage {
                date: date(3),
                amount: Decimal::from(15),
                covered_amount: Decimal::from(10),
                covered_rate: Decimal::new(6667, 2),
            }],
        };

        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["balance"], 40.0);
        assert_eq!(json["withdrawals"][0]["date"], "2024-01-03");
        assert_eq!(json["withdrawals"][0]["covered_amount"], 10.0);
        let rate = json["withdrawals"][0]["covered_rate"].as_f64().unwrap();
        assert!((rate - 66.67).abs() < 1e-9);
    }
}
