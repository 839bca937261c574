//! JSON file ledger store
//!
//! The whole ledger lives in one pretty-printed JSON document. Writers take an
//! advisory lock on a sibling `.lock` file and replace the document through a
//! temp file + rename, so readers never observe a half-written file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::domain::Ledger;
use crate::ports::LedgerStore;

/// Indentation used when writing the ledger document
const INDENT: &[u8] = b"    ";

/// Ledger store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path`, creating its parent directory if needed
    ///
    /// The file itself is only created by the first `save`.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut lock_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        lock_name.push(".lock");
        Ok(Self {
            path: path.to_path_buf(),
            lock_path: path.with_file_name(lock_name),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn open_lock_file(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        Ok(file)
    }

    fn encode(ledger: &Ledger) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        ledger.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Ledger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut ledger = match serde_json::from_str::<Ledger>(&content) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ledger file is malformed, starting empty"
                );
                return Ok(Ledger::new());
            }
        };

        let repairs = ledger.normalize();
        if !repairs.is_empty() {
            tracing::warn!(
                histories_added = repairs.histories_added.len(),
                orphans_dropped = repairs.orphans_dropped.len(),
                "ledger accounts and histories were out of step"
            );
        }
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let bytes = Self::encode(ledger)?;
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::from(e.error))?;
        tracing::debug!(path = %self.path.display(), accounts = ledger.len(), "ledger saved");
        Ok(())
    }

    fn exclusive<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock = self.open_lock_file()?;
        lock.lock_exclusive()
            .map_err(|e| Error::storage(format!("failed to lock {}: {}", self.lock_path.display(), e)))?;
        let out = f();
        if let Err(e) = FileExt::unlock(&lock) {
            tracing::warn!(error = %e, "failed to release ledger lock");
        }
        out
    }
}
