//! Deposit, withdraw and transfer commands

use anyhow::Result;
use bank_core::AccountId;

use super::{get_context, parse_amount, require_login};
use crate::output;

pub fn run_deposit(amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let id = require_login(&ctx)?;

    let receipt = ctx.ledger_service.deposit(&id, amount)?;
    output::success(&format!("Deposited {} successfully!", output::money(receipt.amount)));
    output::info(&format!("Balance: {}", output::money(receipt.balance)));
    Ok(())
}

pub fn run_withdraw(amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let id = require_login(&ctx)?;

    let receipt = ctx.ledger_service.withdraw(&id, amount)?;
    output::success(&format!("Withdrew {} successfully!", output::money(receipt.amount)));
    output::info(&format!("Balance: {}", output::money(receipt.balance)));
    Ok(())
}

pub fn run_transfer(target: &str, amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let ctx = get_context()?;
    let id = require_login(&ctx)?;
    let target = AccountId::resolve(target)?;

    let receipt = ctx.ledger_service.transfer(&id, &target, amount)?;
    output::success(&format!(
        "Transferred {} to {}!",
        output::money(receipt.amount),
        receipt.receiver_name
    ));
    output::info(&format!("Balance: {}", output::money(receipt.balance)));
    Ok(())
}
