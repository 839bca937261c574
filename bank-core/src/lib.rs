//! Bank Core - account ledger logic for the bank demo
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Account, Ledger, TransactionRecord, errors)
//! - **ports**: Trait definitions for collaborators (LedgerStore, CredentialVerifier, SessionStore)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (JSON file, in-memory, Argon2, session file)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use adapters::{verifier_for, FileSessionStore, JsonFileStore};
use config::{Config, PinScheme};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{AuthReason, ConflictReason, Error, OperationResult, Result, ValidationReason};
pub use domain::{format_amount, Account, AccountId, Ledger, Registration, TransactionRecord};
pub use ports::{LedgerStore, SessionStore};

/// Session file name inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// Settings an admin may change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub admin_password: Option<String>,
    pub pin_scheme: Option<PinScheme>,
    pub minimum_age: Option<u32>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.admin_password.is_none() && self.pin_scheme.is_none() && self.minimum_age.is_none()
    }
}

/// Main context for bank operations
///
/// Holds the configuration, the ledger store for a data directory and all
/// services wired to it.
pub struct BankContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: Arc<JsonFileStore>,
    pub session: FileSessionStore,
    pub account_service: AccountService,
    pub ledger_service: LedgerService,
    pub history_service: HistoryService,
    pub admin_service: AdminService,
}

impl BankContext {
    /// Create a context for `data_dir`, creating the directory if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let config = Config::load(data_dir)?;

        let store = Arc::new(JsonFileStore::new(&config.ledger_path(data_dir))?);
        let verifier = verifier_for(config.pin_scheme);
        tracing::debug!(
            data_dir = %data_dir.display(),
            pin_scheme = verifier.scheme(),
            "bank context ready"
        );

        let account_service = AccountService::new(Arc::clone(&store), verifier, config.minimum_age);
        let ledger_service = LedgerService::new(Arc::clone(&store));
        let history_service = HistoryService::new(Arc::clone(&store));
        let admin_service = AdminService::new(Arc::clone(&store), config.admin_password.clone());
        let session = FileSessionStore::new(&data_dir.join(SESSION_FILE));

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            store,
            session,
            account_service,
            ledger_service,
            history_service,
            admin_service,
        })
    }

    /// The logged-in account, or `AuthReason::NotLoggedIn`
    ///
    /// A session pointing at a deleted account is cleared and treated as
    /// logged out.
    pub fn acting_account(&self) -> Result<AccountId> {
        let id = self.session.current()?.ok_or(AuthReason::NotLoggedIn)?;
        if !self.store.load()?.contains(&id) {
            self.session.end()?;
            return Err(AuthReason::NotLoggedIn.into());
        }
        Ok(id)
    }

    /// Write changed settings to settings.json behind the admin password
    ///
    /// Returns the stored settings. They take effect for the next context;
    /// environment overrides are not written.
    pub fn update_settings(&self, password: &str, update: SettingsUpdate) -> Result<Config> {
        self.admin_service.authorize("update_settings", password)?;

        let mut stored = Config::load_file(&self.data_dir)?;
        if let Some(new_password) = update.admin_password {
            if new_password.trim().is_empty() {
                return Err(ValidationReason::MissingField("admin password").into());
            }
            stored.admin_password = new_password;
        }
        if let Some(scheme) = update.pin_scheme {
            stored.pin_scheme = scheme;
        }
        if let Some(age) = update.minimum_age {
            stored.minimum_age = age;
        }
        stored.save(&self.data_dir)?;
        tracing::info!(op = "update_settings", pin_scheme = ?stored.pin_scheme, "settings saved");
        Ok(stored)
    }
}
