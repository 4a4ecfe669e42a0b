//! Core business logic module
//!
//! This module contains the balance engine and the components around it:
//! - `classifier` - Partitions transactions into buckets by (type, state)
//! - `aggregator` - Sums the buckets into a signed net balance
//! - `allocator` - Greedy, date-ordered allocation across scheduled withdrawals
//! - `engine` - `compute_balance`, the entry point tying the three together
//! - `traits` - Storage collaborator abstractions
//! - `memory_store` / `file_store` - Storage implementations
//! - `service` - User-facing ledger operations over a store
//! - `async` - Concurrent balance computation for whole ledgers

pub mod aggregator;
pub mod allocator;
pub mod r#async;
pub mod classifier;
pub mod engine;
pub mod file_store;
pub mod memory_store;
pub mod service;
pub mod traits;

pub use engine::compute_balance;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use r#async::BalanceProcessor;
pub use service::LedgerService;
pub use traits::{TransactionStore, UserRegistry, TRANSACTIONS_TABLE};
