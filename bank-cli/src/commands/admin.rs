//! Admin summary command

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};

use super::{get_context, prompt_secret};
use crate::output;

pub fn run(password: Option<String>, json: bool) -> Result<()> {
    let password = prompt_secret(password, "Admin password")?;
    let ctx = get_context()?;
    let summary = ctx.admin_service.summary(&password)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n{}\n", "Admin Dashboard".bold());

    if summary.accounts.is_empty() {
        output::info("No accounts yet.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["Account number", "Name", "Username", "Email", "Balance"]);
        for account in &summary.accounts {
            table.add_row(vec![
                Cell::new(account.account_number.as_str()),
                Cell::new(&account.name),
                Cell::new(&account.username),
                Cell::new(&account.email),
                Cell::new(output::money(account.balance)).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{table}");
    }

    println!(
        "\n{} {}   {} {}",
        "Accounts:".bold(),
        summary.account_count,
        "Total balance:".bold(),
        output::money(summary.total_balance)
    );
    Ok(())
}
