//! CLI command implementations

pub mod admin;
pub mod dashboard;
pub mod delete;
pub mod history;
pub mod login;
pub mod money;
pub mod register;
pub mod settings;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use bank_core::{AccountId, BankContext};
use dialoguer::{Input, Password};
use rust_decimal::Decimal;

/// Get the bank data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".bank"))
}

/// Get or create bank context
pub fn get_context() -> Result<BankContext> {
    let data_dir = get_data_dir()?;
    BankContext::new(&data_dir)
        .with_context(|| format!("Failed to open bank data in {:?}", data_dir))
}

/// The logged-in account; fails with "please login first" otherwise
pub fn require_login(ctx: &BankContext) -> Result<AccountId> {
    Ok(ctx.acting_account()?)
}

/// Parse a money amount exactly (no float round trip)
pub fn parse_amount(input: &str) -> Result<Decimal> {
    Decimal::from_str(input.trim()).map_err(|_| anyhow!("Enter a valid amount: '{}'", input.trim()))
}

/// Use the given value or ask for it on the terminal
pub fn prompt_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Like `prompt_text`, without echoing what is typed
pub fn prompt_secret(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?),
    }
}
