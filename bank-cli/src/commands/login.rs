//! Login and logout commands

use anyhow::Result;
use bank_core::SessionStore;

use super::{get_context, prompt_secret};
use crate::output;

pub fn run(account_number: &str, pin: Option<String>) -> Result<()> {
    let pin = prompt_secret(pin, "PIN")?;
    let ctx = get_context()?;

    let (id, account) = ctx.account_service.login(account_number, &pin)?;
    ctx.session.begin(&id)?;

    output::success(&format!("Welcome, {}!", account.name));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.session.end()?;
    output::success("You've been logged out!");
    Ok(())
}
