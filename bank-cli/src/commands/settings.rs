//! Settings command

use anyhow::{anyhow, Result};
use bank_core::config::PinScheme;
use bank_core::SettingsUpdate;
use colored::Colorize;
use comfy_table::Cell;

use super::{get_context, prompt_secret};
use crate::output;

pub fn run(
    password: Option<String>,
    pin_scheme: Option<String>,
    minimum_age: Option<u32>,
    new_admin_password: Option<String>,
    json: bool,
) -> Result<()> {
    let pin_scheme = pin_scheme
        .map(|value| {
            PinScheme::parse(&value)
                .ok_or_else(|| anyhow!("Unknown PIN scheme '{}' (use plaintext or argon2)", value))
        })
        .transpose()?;
    let update = SettingsUpdate {
        admin_password: new_admin_password,
        pin_scheme,
        minimum_age,
    };

    let ctx = get_context()?;
    let config = if update.is_empty() {
        ctx.config.clone()
    } else {
        let password = prompt_secret(password, "Admin password")?;
        ctx.update_settings(&password, update)?
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "dataFile": config.data_file,
                "pinScheme": config.pin_scheme,
                "minimumAge": config.minimum_age,
            }))?
        );
        return Ok(());
    }

    println!("\n{}\n", "Settings".bold());
    let mut table = output::create_table();
    table.add_row(vec![Cell::new("Data file"), Cell::new(&config.data_file)]);
    table.add_row(vec![Cell::new("PIN scheme"), Cell::new(format!("{:?}", config.pin_scheme).to_lowercase())]);
    table.add_row(vec![Cell::new("Minimum age"), Cell::new(config.minimum_age)]);
    println!("{table}");
    Ok(())
}
