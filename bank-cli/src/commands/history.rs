//! History command

use anyhow::Result;

use super::{get_context, require_login};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let id = require_login(&ctx)?;
    let records = ctx.history_service.history(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        output::info("No transactions yet.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["#", "Transaction"]);
    for (n, record) in records.iter().enumerate() {
        table.add_row(vec![(n + 1).to_string(), record.to_string()]);
    }
    println!("{table}");
    Ok(())
}
