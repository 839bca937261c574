//! Account domain model

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, ValidationReason};

/// Number of digits in an account number
pub const ACCOUNT_NUMBER_DIGITS: usize = 14;

const ACCOUNT_NUMBER_MIN: u64 = 10_000_000_000_000;
const ACCOUNT_NUMBER_MAX: u64 = 99_999_999_999_999;

/// Amounts are whole cents
pub const AMOUNT_DECIMALS: u32 = 2;

/// Largest balance an account may hold: 1,000,000,000,000.00
///
/// Balances persist as JSON floats. Every cent value up to this bound
/// survives a float round trip unchanged.
pub const MAX_BALANCE: Decimal = Decimal::from_parts(0x107A_4000, 0x5AF3, 0, false, AMOUNT_DECIMALS);

/// 14-digit account number, the primary key of the ledger
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Draw a random account number in `[10^13, 10^14 - 1]`
    ///
    /// Uniqueness is the caller's job (see `Ledger::allocate_id`).
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let n = rng.gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX);
        Self(n.to_string())
    }

    /// Parse user input as an account number
    pub fn parse(input: &str) -> Result<Self, ValidationReason> {
        let s = input.trim();
        let well_formed = s.len() == ACCOUNT_NUMBER_DIGITS
            && s.bytes().all(|b| b.is_ascii_digit())
            && !s.starts_with('0');
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationReason::MalformedAccountNumber)
        }
    }

    /// Parse user input naming an account that should already exist
    ///
    /// Malformed input cannot name any account, so it fails as not found.
    pub fn resolve(input: &str) -> Result<Self, Error> {
        Self::parse(input).map_err(|_| Error::account_not_found(input.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = ValidationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One customer's profile, credential and balance
///
/// Field names and the float balance match the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Date of birth as entered (`YYYY-MM-DD`)
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub username: String,
    /// Sealed PIN; its format depends on the configured `CredentialVerifier`
    pub pin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Check that `amount` is something money can move in
///
/// Positive, whole cents, and no larger than `MAX_BALANCE`.
pub fn check_amount(amount: Decimal) -> Result<(), ValidationReason> {
    if amount <= Decimal::ZERO {
        return Err(ValidationReason::NonPositiveAmount);
    }
    if amount.normalize().scale() > AMOUNT_DECIMALS {
        return Err(ValidationReason::TooManyDecimals);
    }
    if amount > MAX_BALANCE {
        return Err(ValidationReason::AmountTooLarge);
    }
    Ok(())
}

impl Account {
    /// Debit the balance, refusing to go below zero
    pub fn debit(&mut self, amount: Decimal) -> Result<(), ValidationReason> {
        check_amount(amount)?;
        if amount > self.balance {
            return Err(ValidationReason::InsufficientFunds);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(ValidationReason::InsufficientFunds)?;
        Ok(())
    }

    /// Credit the balance, refusing to pass `MAX_BALANCE`
    pub fn credit(&mut self, amount: Decimal) -> Result<(), ValidationReason> {
        check_amount(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .filter(|balance| *balance <= MAX_BALANCE)
            .ok_or(ValidationReason::AmountTooLarge)?;
        Ok(())
    }
}
