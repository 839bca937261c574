//! History service - transaction history views

use std::sync::Arc;

use crate::adapters::JsonFileStore;
use crate::domain::result::Result;
use crate::domain::{AccountId, TransactionRecord};
use crate::ports::LedgerStore;

/// Read-only access to account histories
pub struct HistoryService<S = JsonFileStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> HistoryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Most recent entry first; empty when the account has no history
    pub fn history(&self, id: &AccountId) -> Result<Vec<TransactionRecord>> {
        let ledger = self.store.load()?;
        Ok(ledger.history(id).iter().rev().cloned().collect())
    }
}
