//! Repository port - ledger persistence abstraction

use crate::domain::result::Result;
use crate::domain::Ledger;

/// Whole-document ledger persistence
///
/// The ledger is always read and written as a unit. Implementations decide
/// where it lives; services only see `load`, `save` and `transaction`.
pub trait LedgerStore: Send + Sync {
    /// Read the current ledger
    ///
    /// A missing or unreadable document yields an empty ledger, never an error
    /// about its content. I/O failures other than "not found" still surface.
    fn load(&self) -> Result<Ledger>;

    /// Replace the persisted ledger
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Run `f` while holding the store's exclusive lock
    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce() -> Result<T>;

    /// Load, mutate, save as one unit
    ///
    /// Nothing is written when `f` fails, so a rejected operation leaves the
    /// stored ledger untouched. Concurrent transactions on the same store
    /// serialise on the exclusive lock.
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        self.exclusive(|| {
            let mut ledger = self.load()?;
            let out = f(&mut ledger)?;
            self.save(&ledger)?;
            Ok(out)
        })
    }
}
