//! In-memory ledger store for tests and embedding

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::Ledger;
use crate::ports::LedgerStore;

/// Ledger store that never touches disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
    gate: Mutex<()>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            ..Self::default()
        }
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> Error {
    Error::storage(format!("Lock poisoned: {}", e))
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Ledger> {
        Ok(self.ledger.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        *self.ledger.lock().map_err(poisoned)? = ledger.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _guard = self.gate.lock().map_err(poisoned)?;
        f()
    }
}
