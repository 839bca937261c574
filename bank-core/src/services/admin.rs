//! Admin service - whole-bank overview behind a shared password

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::adapters::JsonFileStore;
use crate::domain::result::{AuthReason, Result};
use crate::ports::LedgerStore;

use super::AccountProfile;

/// Every account plus the bank's total holdings
#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub accounts: Vec<AccountProfile>,
    pub account_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
}

/// Overview gated by a static admin password
pub struct AdminService<S = JsonFileStore> {
    store: Arc<S>,
    admin_password: String,
}

impl<S: LedgerStore> AdminService<S> {
    pub fn new(store: Arc<S>, admin_password: impl Into<String>) -> Self {
        Self {
            store,
            admin_password: admin_password.into(),
        }
    }

    /// Check the shared admin password
    pub fn authorize(&self, op: &'static str, password: &str) -> Result<()> {
        if password != self.admin_password {
            tracing::warn!(op = op, code = "incorrect_admin_password", "operation rejected");
            return Err(AuthReason::IncorrectAdminPassword.into());
        }
        Ok(())
    }

    pub fn summary(&self, password: &str) -> Result<AdminSummary> {
        self.authorize("admin_summary", password)?;

        let ledger = self.store.load()?;
        let accounts: Vec<AccountProfile> = ledger
            .accounts()
            .map(|(id, account)| AccountProfile::new(id, account))
            .collect();
        tracing::info!(op = "admin_summary", accounts = accounts.len(), "admin overview served");

        Ok(AdminSummary {
            account_count: accounts.len(),
            total_balance: ledger.total_balance()?,
            accounts,
        })
    }
}
