//! Session port - who is acting

use crate::domain::result::Result;
use crate::domain::AccountId;

/// Holds the "current acting account" between operations
pub trait SessionStore: Send + Sync {
    fn current(&self) -> Result<Option<AccountId>>;

    fn begin(&self, id: &AccountId) -> Result<()>;

    /// Forget the acting account; ending an absent session is not an error
    fn end(&self) -> Result<()>;
}
