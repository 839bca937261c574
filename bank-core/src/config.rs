//! Configuration management
//!
//! Settings live in `<data dir>/settings.json`:
//! ```json
//! {
//!   "dataFile": "bank_data.json",
//!   "adminPassword": "admin123",
//!   "pinScheme": "plaintext",
//!   "minimumAge": 18
//! }
//! ```
//! Keys this crate does not know are kept when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DATA_FILE: &str = "bank_data.json";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

/// How PINs are stored in the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinScheme {
    #[default]
    Plaintext,
    Argon2,
}

impl PinScheme {
    /// Parse a scheme name as given in the environment or on the command line
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "plaintext" | "plain" => Some(Self::Plaintext),
            "argon2" | "argon2id" => Some(Self::Argon2),
            _ => None,
        }
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pin_scheme: Option<PinScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minimum_age: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Bank configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    /// Ledger file name, relative to the data directory
    pub data_file: String,
    pub admin_password: String,
    pub pin_scheme: PinScheme,
    pub minimum_age: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            pin_scheme: PinScheme::default(),
            minimum_age: DEFAULT_MINIMUM_AGE,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or malformed settings file means defaults. The admin
    /// password and PIN scheme can be overridden with `BANK_ADMIN_PASSWORD`
    /// and `BANK_PIN_SCHEME`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;
        config.apply_env();
        Ok(config)
    }

    /// Load settings.json only, without environment overrides
    ///
    /// Use this as the base for `save` so overrides never end up on disk.
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(&data_dir.join(SETTINGS_FILE))?;
        let mut config = Self::default();

        if let Some(file) = raw.data_file.filter(|f| !f.trim().is_empty()) {
            config.data_file = file;
        }
        if let Some(password) = raw.admin_password {
            config.admin_password = password;
        }
        if let Some(scheme) = raw.pin_scheme {
            config.pin_scheme = scheme;
        }
        if let Some(age) = raw.minimum_age {
            config.minimum_age = age;
        }
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(password) = std::env::var("BANK_ADMIN_PASSWORD") {
            if !password.is_empty() {
                self.admin_password = password;
            }
        }
        if let Ok(value) = std::env::var("BANK_PIN_SCHEME") {
            match PinScheme::parse(&value) {
                Some(scheme) => self.pin_scheme = scheme,
                None => tracing::warn!(value = %value, "ignoring unknown BANK_PIN_SCHEME"),
            }
        }
    }

    /// Save config to the data directory, preserving keys we don't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);
        let mut settings = read_settings(&settings_path)?;

        settings.data_file = Some(self.data_file.clone());
        settings.admin_password = Some(self.admin_password.clone());
        settings.pin_scheme = Some(self.pin_scheme);
        settings.minimum_age = Some(self.minimum_age);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Absolute path of the ledger file
    pub fn ledger_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data_file)
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
        SettingsFile::default()
    }))
}
