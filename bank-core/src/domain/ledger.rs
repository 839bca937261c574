//! The ledger document: accounts plus their histories

use std::collections::BTreeMap;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};
use super::result::{Error, Result};
use super::transaction::TransactionRecord;

/// Give up on identifier allocation after this many collisions
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Every account and its transaction history
///
/// Serialises to the persisted document:
/// `{"users": {id: account}, "transactions": {id: [entry, ...]}}`.
/// Both maps always hold the same key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    users: BTreeMap<AccountId, Account>,
    #[serde(default)]
    transactions: BTreeMap<AccountId, Vec<TransactionRecord>>,
}

/// What `Ledger::normalize` had to fix
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Repairs {
    pub histories_added: Vec<AccountId>,
    pub orphans_dropped: Vec<AccountId>,
}

impl Repairs {
    pub fn is_empty(&self) -> bool {
        self.histories_added.is_empty() && self.orphans_dropped.is_empty()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the shared key set after loading a hand-edited document
    pub fn normalize(&mut self) -> Repairs {
        let mut repairs = Repairs::default();
        for id in self.users.keys() {
            if !self.transactions.contains_key(id) {
                self.transactions.insert(id.clone(), Vec::new());
                repairs.histories_added.push(id.clone());
            }
        }
        let users = &self.users;
        self.transactions.retain(|id, _| {
            let keep = users.contains_key(id);
            if !keep {
                repairs.orphans_dropped.push(id.clone());
            }
            keep
        });
        repairs
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.users.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn account(&self, id: &AccountId) -> Result<&Account> {
        self.users.get(id).ok_or_else(|| Error::account_not_found(id))
    }

    pub fn account_mut(&mut self, id: &AccountId) -> Result<&mut Account> {
        self.users.get_mut(id).ok_or_else(|| Error::account_not_found(id))
    }

    /// Accounts in account-number order
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.users.iter()
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.users.values().any(|a| a.username == username)
    }

    /// Sum of every balance
    ///
    /// Only fails for hand-edited files whose balances sum past `Decimal::MAX`.
    pub fn total_balance(&self) -> Result<Decimal> {
        self.users
            .values()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance))
            .ok_or_else(|| Error::Other("total balance overflows".to_string()))
    }

    /// Draw account numbers until one is free
    pub fn allocate_id<R: Rng>(&self, rng: &mut R) -> Result<AccountId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = AccountId::generate(rng);
            if !self.contains(&id) {
                return Ok(id);
            }
            tracing::debug!(account = %id, "account number collision, retrying");
        }
        Err(Error::Other(format!(
            "could not allocate a free account number after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Insert a new account with an empty history
    pub fn open(&mut self, id: AccountId, account: Account) -> Result<()> {
        if self.contains(&id) {
            return Err(Error::Other(format!("account {} already exists", id)));
        }
        self.transactions.insert(id.clone(), Vec::new());
        self.users.insert(id, account);
        Ok(())
    }

    /// Remove an account and its history together
    pub fn close(&mut self, id: &AccountId) -> Result<Account> {
        let account = self.users.remove(id).ok_or_else(|| Error::account_not_found(id))?;
        self.transactions.remove(id);
        Ok(account)
    }

    /// Oldest-first history; empty for unknown accounts
    pub fn history(&self, id: &AccountId) -> &[TransactionRecord] {
        self.transactions.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record(&mut self, id: &AccountId, entry: TransactionRecord) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::account_not_found(id));
        }
        self.transactions.entry(id.clone()).or_default().push(entry);
        Ok(())
    }

    /// Two distinct accounts borrowed mutably at once
    pub fn pair_mut(
        &mut self,
        first: &AccountId,
        second: &AccountId,
    ) -> Result<(&mut Account, &mut Account)> {
        if first == second {
            return Err(Error::Other("cannot borrow the same account twice".into()));
        }
        let mut a = None;
        let mut b = None;
        for (id, account) in self.users.iter_mut() {
            if id == first {
                a = Some(account);
            } else if id == second {
                b = Some(account);
            }
        }
        match (a, b) {
            (Some(a), Some(b)) => Ok((a, b)),
            (None, _) => Err(Error::account_not_found(first)),
            (_, None) => Err(Error::account_not_found(second)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(s: &str) -> AccountId {
        AccountId::parse(s).unwrap()
    }

    fn account(username: &str, balance: i64) -> Account {
        Account {
            name: username.to_uppercase(),
            dob: "1990-01-01".into(),
            gender: "M".into(),
            phone: "555".into(),
            email: format!("{}@example.com", username),
            username: username.into(),
            pin: "0000".into(),
            balance: Decimal::new(balance, 0),
        }
    }

    #[test]
    fn test_open_and_close_keep_maps_aligned() {
        let mut ledger = Ledger::new();
        let a = id("11111111111111");
        ledger.open(a.clone(), account("a", 0)).unwrap();
        assert!(ledger.history(&a).is_empty());
        ledger.record(&a, TransactionRecord::deposited(Decimal::ONE)).unwrap();

        ledger.close(&a).unwrap();
        assert!(!ledger.contains(&a));
        assert!(ledger.history(&a).is_empty());
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn test_open_refuses_existing_id() {
        let mut ledger = Ledger::new();
        let a = id("11111111111111");
        ledger.open(a.clone(), account("a", 5)).unwrap();
        assert!(ledger.open(a.clone(), account("b", 0)).is_err());
        assert_eq!(ledger.account(&a).unwrap().username, "a");
    }

    #[test]
    fn test_normalize_repairs_key_sets() {
        let doc = r#"{
            "users": {"11111111111111": {"name": "A", "dob": "1990-01-01", "gender": "F",
                "phone": "1", "email": "e", "username": "a", "pin": "1", "balance": 10.5}},
            "transactions": {"22222222222222": ["Deposited 1.00"]}
        }"#;
        let mut ledger: Ledger = serde_json::from_str(doc).unwrap();
        let repairs = ledger.normalize();
        assert_eq!(repairs.histories_added, vec![id("11111111111111")]);
        assert_eq!(repairs.orphans_dropped, vec![id("22222222222222")]);
        assert!(ledger.normalize().is_empty());
    }

    #[test]
    fn test_missing_top_level_keys_default_to_empty() {
        let ledger: Ledger = serde_json::from_str("{}").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_allocate_id_skips_taken_numbers() {
        let mut ledger = Ledger::new();
        let taken = AccountId::generate(&mut StdRng::seed_from_u64(42));
        ledger.open(taken.clone(), account("a", 0)).unwrap();

        let fresh = ledger.allocate_id(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_ne!(fresh, taken);
    }

    #[test]
    fn test_pair_mut() {
        let mut ledger = Ledger::new();
        let a = id("11111111111111");
        let b = id("22222222222222");
        ledger.open(a.clone(), account("a", 5)).unwrap();
        ledger.open(b.clone(), account("b", 7)).unwrap();

        let (x, y) = ledger.pair_mut(&b, &a).unwrap();
        assert_eq!(x.username, "b");
        assert_eq!(y.username, "a");
        assert!(ledger.pair_mut(&a, &a).is_err());
        assert!(matches!(
            ledger.pair_mut(&a, &id("33333333333333")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_total_balance() {
        let mut ledger = Ledger::new();
        ledger.open(id("11111111111111"), account("a", 5)).unwrap();
        ledger.open(id("22222222222222"), account("b", 7)).unwrap();
        assert_eq!(ledger.total_balance().unwrap(), Decimal::new(12, 0));
        assert!(ledger.username_taken("b"));
        assert!(!ledger.username_taken("c"));
    }

    #[test]
    fn test_total_balance_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        let mut big = account("a", 0);
        big.balance = Decimal::MAX;
        ledger.open(id("11111111111111"), big.clone()).unwrap();
        big.username = "b".into();
        ledger.open(id("22222222222222"), big).unwrap();
        assert!(ledger.total_balance().is_err());
    }
}
