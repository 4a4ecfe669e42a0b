//! Balance Engine Library
//!
//! # Overview
//!
//! Tracks a user's transactions (deposits, refunds, scheduled withdrawals)
//! and derives a point-in-time balance plus a coverage projection for the
//! scheduled withdrawals still to come.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, Balance, LedgerError, ...)
//! - [`core`] - Business logic components:
//!   - [`core::classifier`] - Buckets transactions by `(type, state)`
//!   - [`core::aggregator`] - Net balance over the buckets
//!   - [`core::allocator`] - Greedy, date-ordered coverage of scheduled withdrawals
//!   - [`core::engine`] - [`compute_balance`], the three steps in sequence
//!   - [`core::traits`] - Storage collaborator traits
//!   - [`core::service`] - User-facing operations over a store
//! - [`io`] - CSV and JSON formats, sync and async readers
//! - [`strategy`] - Whole-ledger reports, synchronous or asynchronous
//! - [`cli`] - CLI arguments parsing
//!
//! # Coverage
//!
//! Scheduled withdrawals are funded earliest first. Each one reports how much
//! of its amount the remaining balance covers and the covered rate as a
//! percentage rounded to two decimals:
//!
//! ```
//! use balance_engine::compute_balance;
//! use balance_engine::types::{Transaction, TransactionState, TransactionType};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let date = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
//! let history = vec![
//!     Transaction {
//!         id: 1,
//!         user_id: 1,
//!         tx_type: TransactionType::Deposit,
//!         state: TransactionState::Completed,
//!         amount: Decimal::from(10),
//!         date: date(1),
//!     },
//!     Transaction {
//!         id: 2,
//!         user_id: 1,
//!         tx_type: TransactionType::ScheduledWithdrawal,
//!         state: TransactionState::Scheduled,
//!         amount: Decimal::from(15),
//!         date: date(2),
//!     },
//! ];
//!
//! let balance = compute_balance(&history);
//! assert_eq!(balance.balance, Decimal::ZERO);
//! assert_eq!(balance.withdrawals[0].covered_amount, Decimal::from(10));
//! assert_eq!(balance.withdrawals[0].covered_rate, Decimal::new(6667, 2));
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    compute_balance, FileStore, LedgerService, MemoryStore, TransactionStore, UserRegistry,
};
pub use crate::io::{write_balances_csv, write_balances_json};
pub use crate::types::{
    Balance, LedgerError, NewTransaction, Transaction, TransactionId, TransactionState,
    TransactionType, UserId, WithdrawalCoverage,
};
