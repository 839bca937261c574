//! Delete account command

use anyhow::Result;
use bank_core::{AccountId, SessionStore};
use dialoguer::Confirm;

use super::{get_context, prompt_secret};
use crate::output;

pub fn run(account_number: &str, pin: Option<String>, force: bool) -> Result<()> {
    let id = AccountId::resolve(account_number)?;
    let pin = prompt_secret(pin, "PIN")?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete account {} and all its history?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    let ctx = get_context()?;
    ctx.account_service.delete(&id, &pin)?;
    if ctx.session.current()?.as_ref() == Some(&id) {
        ctx.session.end()?;
    }

    output::success("Account deleted successfully!");
    Ok(())
}
