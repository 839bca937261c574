//! Dashboard command

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use super::{get_context, require_login};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let id = require_login(&ctx)?;
    let profile = ctx.account_service.profile(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("\n{}\n", format!("Welcome, {}!", profile.name).bold());

    let mut table = output::create_table();
    table.add_row(vec![Cell::new("Account number"), Cell::new(profile.account_number.as_str())]);
    table.add_row(vec![Cell::new("Username"), Cell::new(&profile.username)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&profile.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&profile.phone)]);
    table.add_row(vec![Cell::new("Balance"), Cell::new(output::money(profile.balance))]);
    println!("{table}");
    Ok(())
}
