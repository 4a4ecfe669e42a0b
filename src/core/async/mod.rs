//! Concurrent balance computation
//!
//! This module computes balances for many users at once. Histories are
//! collected per user in a `DashMap`, then every user's balance is computed
//! in its own tokio task.
//!
//! # Thread Safety
//!
//! Balance computation is pure and each task owns its user's history, so
//! tasks never share mutable state. The shared maps only serialize access to
//! a single user's entry.

pub mod balance_processor;

pub use balance_processor::BalanceProcessor;
