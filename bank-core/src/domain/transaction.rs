//! Transaction history entries

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::account::AccountId;

/// A free-text history line appended on each balance change
///
/// Stored as a bare string in the ledger document, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord(String);

impl TransactionRecord {
    pub fn deposited(amount: Decimal) -> Self {
        Self(format!("Deposited {}", format_amount(amount)))
    }

    pub fn withdrew(amount: Decimal) -> Self {
        Self(format!("Withdrew {}", format_amount(amount)))
    }

    pub fn transferred_to(amount: Decimal, target: &AccountId) -> Self {
        Self(format!("Transferred {} to {}", format_amount(amount), target))
    }

    pub fn received_from(amount: Decimal, sender: &AccountId) -> Self {
        Self(format!("Received {} from {}", format_amount(amount), sender))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransactionRecord {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Render an amount with exactly two decimals, half away from zero
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
