//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod account;
mod admin;
mod history;
mod ledger;

pub use account::{AccountProfile, AccountService};
pub use admin::{AdminService, AdminSummary};
pub use history::HistoryService;
pub use ledger::{BalanceReceipt, LedgerService, TransferReceipt};

use crate::domain::result::Result;
use crate::domain::AccountId;

/// Log the outcome of an account operation and pass it through
fn audit<T>(op: &'static str, account: &AccountId, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => tracing::info!(op = op, account = %account, "operation applied"),
        Err(e) => tracing::warn!(op = op, account = %account, code = e.code(), "operation rejected"),
    }
    result
}
