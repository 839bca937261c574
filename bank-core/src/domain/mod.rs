//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O.

mod account;
mod ledger;
mod registration;
mod transaction;
pub mod result;

pub use account::{check_amount, Account, AccountId, ACCOUNT_NUMBER_DIGITS, AMOUNT_DECIMALS, MAX_BALANCE};
pub use ledger::{Ledger, Repairs, MAX_ID_ATTEMPTS};
pub use registration::{age_in_years, Registration, DOB_FORMAT};
pub use transaction::{format_amount, TransactionRecord};
