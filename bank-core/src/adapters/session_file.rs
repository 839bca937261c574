//! File-backed session: remembers the logged-in account between commands

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::AccountId;
use crate::ports::SessionStore;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    user: AccountId,
}

/// Session stored as `{"user": "<account number>"}` in a small JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn current(&self) -> Result<Option<AccountId>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // An unreadable session is a logged-out session
        Ok(serde_json::from_str::<SessionFile>(&content)
            .ok()
            .map(|s| s.user))
    }

    fn begin(&self, id: &AccountId) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&SessionFile { user: id.clone() })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn end(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
