//! Account service - registration, login, profile and closure

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::adapters::JsonFileStore;
use crate::domain::result::{AuthReason, ConflictReason, Result};
use crate::domain::{Account, AccountId, Registration};
use crate::ports::{CredentialVerifier, LedgerStore};

use super::audit;

/// Account details safe to show: everything but the PIN
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountProfile {
    pub account_number: AccountId,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub username: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl AccountProfile {
    pub fn new(id: &AccountId, account: &Account) -> Self {
        Self {
            account_number: id.clone(),
            name: account.name.clone(),
            dob: account.dob.clone(),
            gender: account.gender.clone(),
            phone: account.phone.clone(),
            email: account.email.clone(),
            username: account.username.clone(),
            balance: account.balance,
        }
    }
}

/// Account lifecycle and credential checks
pub struct AccountService<S = JsonFileStore> {
    store: Arc<S>,
    verifier: Arc<dyn CredentialVerifier>,
    minimum_age: u32,
}

impl<S: LedgerStore> AccountService<S> {
    pub fn new(store: Arc<S>, verifier: Arc<dyn CredentialVerifier>, minimum_age: u32) -> Self {
        Self {
            store,
            verifier,
            minimum_age,
        }
    }

    /// Register a new account, judging age against today's local date
    pub fn register(&self, form: Registration) -> Result<AccountId> {
        self.register_on(form, Local::now().date_naive())
    }

    /// Register a new account as of `today`
    ///
    /// Checks run in order: required fields, PIN confirmation, date of birth
    /// and age, then username uniqueness. The new account starts at 0.
    pub fn register_on(&self, form: Registration, today: NaiveDate) -> Result<AccountId> {
        let form = form.trimmed();
        if let Err(reason) = form.validate(today, self.minimum_age) {
            tracing::warn!(op = "register", code = reason.code(), "operation rejected");
            return Err(reason.into());
        }
        let sealed_pin = self.verifier.seal(&form.pin)?;

        let result = self.store.transaction(|ledger| {
            if ledger.username_taken(&form.username) {
                return Err(ConflictReason::UsernameTaken(form.username.clone()).into());
            }
            let id = ledger.allocate_id(&mut rand::thread_rng())?;
            let account = Account {
                name: form.name.clone(),
                dob: form.dob.clone(),
                gender: form.gender.clone(),
                phone: form.phone.clone(),
                email: form.email.clone(),
                username: form.username.clone(),
                pin: sealed_pin,
                balance: Decimal::ZERO,
            };
            ledger.open(id.clone(), account)?;
            Ok(id)
        });

        match &result {
            Ok(id) => tracing::info!(op = "register", account = %id, "operation applied"),
            Err(e) => tracing::warn!(op = "register", code = e.code(), "operation rejected"),
        }
        result
    }

    /// Check a PIN against an account
    ///
    /// Unknown account and wrong PIN fail with different reasons.
    pub fn authenticate(&self, id: &AccountId, pin: &str) -> Result<Account> {
        let ledger = self.store.load()?;
        let result: Result<Account> = match ledger.account(id) {
            Err(_) => Err(AuthReason::AccountNotFound.into()),
            Ok(account) if !self.verifier.verify(&account.pin, pin.trim()) => {
                Err(AuthReason::IncorrectPin.into())
            }
            Ok(account) => Ok(account.clone()),
        };
        audit("authenticate", id, result)
    }

    /// Authenticate from raw input; a malformed number is an unknown account
    pub fn login(&self, account_number: &str, pin: &str) -> Result<(AccountId, Account)> {
        let id = AccountId::parse(account_number).map_err(|_| AuthReason::AccountNotFound)?;
        let account = self.authenticate(&id, pin)?;
        Ok((id, account))
    }

    /// Dashboard view of one account
    pub fn profile(&self, id: &AccountId) -> Result<AccountProfile> {
        let ledger = self.store.load()?;
        let account = ledger.account(id)?;
        Ok(AccountProfile::new(id, account))
    }

    /// Close an account after re-checking its PIN; removes its history too
    pub fn delete(&self, id: &AccountId, pin: &str) -> Result<()> {
        let result = self.store.transaction(|ledger| {
            let account = ledger.account(id)?;
            if !self.verifier.verify(&account.pin, pin.trim()) {
                return Err(AuthReason::IncorrectPin.into());
            }
            ledger.close(id)?;
            Ok(())
        });
        audit("delete", id, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Argon2Pin, MemoryStore, PlaintextPin};
    use crate::domain::result::{Error, ValidationReason};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(username: &str) -> Registration {
        Registration {
            name: "A".into(),
            dob: "2000-01-01".into(),
            gender: "F".into(),
            phone: "5550100".into(),
            email: "a@example.com".into(),
            username: username.into(),
            pin: "1234".into(),
            confirm_pin: "1234".into(),
        }
    }

    fn service() -> (Arc<MemoryStore>, AccountService<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let svc = AccountService::new(Arc::clone(&store), Arc::new(PlaintextPin), 18);
        (store, svc)
    }

    #[test]
    fn test_register_opens_empty_account() {
        let (store, svc) = service();
        let id = svc.register_on(form("alice"), today()).unwrap();
        assert_eq!(id.as_str().len(), 14);

        let ledger = store.load().unwrap();
        let account = ledger.account(&id).unwrap();
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.pin, "1234");
        assert!(ledger.history(&id).is_empty());
    }

    #[test]
    fn test_register_trims_input() {
        let (store, svc) = service();
        let mut f = form("  bob ");
        f.name = " Bob ".into();
        let id = svc.register_on(f, today()).unwrap();
        let ledger = store.load().unwrap();
        assert_eq!(ledger.account(&id).unwrap().username, "bob");
        assert_eq!(ledger.account(&id).unwrap().name, "Bob");
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let (store, svc) = service();
        svc.register_on(form("alice"), today()).unwrap();
        let err = svc.register_on(form("alice"), today()).unwrap_err();
        assert!(matches!(err, Error::Conflict(ConflictReason::UsernameTaken(_))));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_validation_failure_does_not_touch_store() {
        let (store, svc) = service();
        let mut f = form("alice");
        f.confirm_pin = "0000".into();
        let err = svc.register_on(f, today()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationReason::PinMismatch)));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_authenticate_distinguishes_failures() {
        let (_, svc) = service();
        let id = svc.register_on(form("alice"), today()).unwrap();

        assert_eq!(svc.authenticate(&id, "1234").unwrap().username, "alice");
        assert!(matches!(
            svc.authenticate(&id, "9999"),
            Err(Error::Auth(AuthReason::IncorrectPin))
        ));
        let stranger = AccountId::parse("99999999999999").unwrap();
        assert!(matches!(
            svc.authenticate(&stranger, "1234"),
            Err(Error::Auth(AuthReason::AccountNotFound))
        ));
    }

    #[test]
    fn test_login_treats_malformed_number_as_unknown() {
        let (_, svc) = service();
        assert!(matches!(
            svc.login("12ab", "1234"),
            Err(Error::Auth(AuthReason::AccountNotFound))
        ));
    }

    #[test]
    fn test_profile_hides_pin() {
        let (_, svc) = service();
        let id = svc.register_on(form("alice"), today()).unwrap();
        let json = serde_json::to_value(svc.profile(&id).unwrap()).unwrap();
        assert!(json.get("pin").is_none());
        assert_eq!(json["balance"], serde_json::json!(0.0));
        assert_eq!(json["account_number"], id.as_str());
    }

    #[test]
    fn test_delete_requires_correct_pin() {
        let (store, svc) = service();
        let id = svc.register_on(form("alice"), today()).unwrap();

        assert!(matches!(
            svc.delete(&id, "0000"),
            Err(Error::Auth(AuthReason::IncorrectPin))
        ));
        assert!(store.load().unwrap().contains(&id));

        svc.delete(&id, "1234").unwrap();
        assert!(!store.load().unwrap().contains(&id));
        assert!(matches!(svc.delete(&id, "1234"), Err(Error::NotFound(_))));
        assert!(matches!(svc.profile(&id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_argon2_scheme_hides_stored_pin() {
        let store = Arc::new(MemoryStore::new());
        let svc = AccountService::new(Arc::clone(&store), Arc::new(Argon2Pin::new()), 18);
        let id = svc.register_on(form("alice"), today()).unwrap();

        let stored = store.load().unwrap().account(&id).unwrap().pin.clone();
        assert_ne!(stored, "1234");
        assert!(svc.authenticate(&id, "1234").is_ok());
        assert!(svc.authenticate(&id, "4321").is_err());
    }
}
