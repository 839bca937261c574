//! Register command

use anyhow::Result;
use bank_core::Registration;

use super::{get_context, prompt_secret, prompt_text};
use crate::output;

/// Registration fields given on the command line
pub struct RegisterArgs {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub pin: Option<String>,
    pub confirm_pin: Option<String>,
}

pub fn run(args: RegisterArgs, json: bool) -> Result<()> {
    let form = Registration {
        name: prompt_text(args.name, "Full name")?,
        dob: prompt_text(args.dob, "Date of birth (YYYY-MM-DD)")?,
        gender: prompt_text(args.gender, "Gender")?,
        phone: prompt_text(args.phone, "Phone")?,
        email: prompt_text(args.email, "Email")?,
        username: prompt_text(args.username, "Username")?,
        pin: prompt_secret(args.pin, "PIN")?,
        confirm_pin: prompt_secret(args.confirm_pin, "Confirm PIN")?,
    };

    let ctx = get_context()?;
    let id = ctx.account_service.register(form)?;

    if json {
        println!("{}", serde_json::json!({ "account_number": id }));
        return Ok(());
    }
    output::success(&format!("Account created successfully! Your account number is {}", id));
    output::info("Log in with: bank login <account number>");
    Ok(())
}
