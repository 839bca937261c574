//! Ledger service - deposits, withdrawals and transfers
//!
//! Each operation is one store transaction: the balance change and its
//! history line(s) are saved together or not at all.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::adapters::JsonFileStore;
use crate::domain::result::{Result, ValidationReason};
use crate::domain::{AccountId, TransactionRecord};
use crate::ports::LedgerStore;

use super::audit;

/// Outcome of a deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReceipt {
    pub account_number: AccountId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub entry: TransactionRecord,
}

/// Outcome of a transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub from: AccountId,
    pub to: AccountId,
    pub receiver_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Balance-changing operations for an acting account
pub struct LedgerService<S = JsonFileStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Add `amount` (> 0) to the account
    pub fn deposit(&self, id: &AccountId, amount: Decimal) -> Result<BalanceReceipt> {
        let result = self.store.transaction(|ledger| {
            let account = ledger.account_mut(id)?;
            account.credit(amount)?;
            let balance = account.balance;
            let entry = TransactionRecord::deposited(amount);
            ledger.record(id, entry.clone())?;
            Ok(BalanceReceipt {
                account_number: id.clone(),
                amount,
                balance,
                entry,
            })
        });
        audit("deposit", id, result)
    }

    /// Take `amount` out; must be positive and no more than the balance
    pub fn withdraw(&self, id: &AccountId, amount: Decimal) -> Result<BalanceReceipt> {
        let result = self.store.transaction(|ledger| {
            let account = ledger.account_mut(id)?;
            account.debit(amount)?;
            let balance = account.balance;
            let entry = TransactionRecord::withdrew(amount);
            ledger.record(id, entry.clone())?;
            Ok(BalanceReceipt {
                account_number: id.clone(),
                amount,
                balance,
                entry,
            })
        });
        audit("withdraw", id, result)
    }

    /// Move `amount` from `from` to `to`
    ///
    /// The target must exist and differ from the sender; the amount must be
    /// positive and covered by the sender's balance. Both sides get a
    /// history line.
    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: Decimal) -> Result<TransferReceipt> {
        let result = self.store.transaction(|ledger| {
            ledger.account(from)?;
            ledger.account(to)?;
            if from == to {
                return Err(ValidationReason::SelfTransfer.into());
            }

            let (sender, receiver) = ledger.pair_mut(from, to)?;
            sender.debit(amount)?;
            receiver.credit(amount)?;
            let balance = sender.balance;
            let receiver_name = receiver.name.clone();

            ledger.record(from, TransactionRecord::transferred_to(amount, to))?;
            ledger.record(to, TransactionRecord::received_from(amount, from))?;

            Ok(TransferReceipt {
                from: from.clone(),
                to: to.clone(),
                receiver_name,
                amount,
                balance,
            })
        });
        audit("transfer", from, result)
    }
}
