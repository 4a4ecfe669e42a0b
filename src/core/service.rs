//! Ledger service
//!
//! This module provides the `LedgerService`, the boundary between the outer
//! surface (CLI, or any request layer) and the storage collaborator. It
//! implements the user-facing operations:
//!
//! - listing a user's transactions
//! - fetching one transaction of a user
//! - creating a transaction with its initial state
//! - computing a user's balance
//!
//! Lookups that find nothing return `None`; turning that into a "not found"
//! response is left to the caller.

use crate::core::engine::compute_balance;
use crate::core::traits::{TransactionStore, UserRegistry, TRANSACTIONS_TABLE};
use crate::types::{Balance, LedgerError, NewTransaction, Transaction, TransactionId, UserId};
use tracing::{debug, info};

/// Service over any store implementing both storage traits
pub struct LedgerService<S> {
    store: S,
}

impl<S> LedgerService<S>
where
    S: TransactionStore + UserRegistry,
{
    pub fn new(store: S) -> Self {
        LedgerService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All transactions of `user`, in store order
    pub fn transactions(&self, user: UserId) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .store
            .scan(TRANSACTIONS_TABLE)?
            .into_iter()
            .filter(|transaction| transaction.user_id == user)
            .collect())
    }

    /// A single transaction of `user`
    ///
    /// Returns `None` if the transaction does not exist or belongs to a
    /// different user.
    pub fn transaction(
        &self,
        user: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerError> {
        Ok(self
            .store
            .get(TRANSACTIONS_TABLE, id)?
            .filter(|transaction| transaction.user_id == user))
    }

    /// Create a transaction for `user`
    ///
    /// The initial state follows from the transaction type. The user is
    /// registered if it was not known yet.
    pub fn create_transaction(
        &mut self,
        user: UserId,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let row = new_transaction.into_row(user);

        let transaction = self.store.put(TRANSACTIONS_TABLE, row)?;
        self.store.register_user(user)?;

        info!(
            id = transaction.id,
            user,
            tx_type = %transaction.tx_type,
            state = %transaction.state,
            "created transaction"
        );

        Ok(transaction)
    }

    /// Balance and withdrawal coverage of `user`
    ///
    /// Returns `None` for a user unknown to the ledger. A known user without
    /// transactions gets a zero balance and no withdrawals.
    pub fn user_balance(&self, user: UserId) -> Result<Option<Balance>, LedgerError> {
        if !self.store.contains_user(user)? {
            debug!(user, "balance requested for unknown user");
            return Ok(None);
        }

        let transactions = self.transactions(user)?;
        Ok(Some(compute_balance(&transactions)))
    }
}
