//! PIN verifiers
//!
//! `PlaintextPin` keeps the stored PIN as typed, which is what existing
//! ledger files contain. `Argon2Pin` stores an Argon2id PHC string instead
//! and still accepts plaintext values left over from older files.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::config::PinScheme;
use crate::domain::result::{Error, Result};
use crate::ports::CredentialVerifier;

/// Stored PIN is the PIN
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextPin;

impl CredentialVerifier for PlaintextPin {
    fn scheme(&self) -> &'static str {
        "plaintext"
    }

    fn seal(&self, pin: &str) -> Result<String> {
        Ok(pin.to_string())
    }

    fn verify(&self, stored: &str, presented: &str) -> bool {
        stored == presented
    }
}

/// Stored PIN is an Argon2id hash
#[derive(Clone, Default)]
pub struct Argon2Pin {
    hasher: Argon2<'static>,
}

impl Argon2Pin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVerifier for Argon2Pin {
    fn scheme(&self) -> &'static str {
        "argon2"
    }

    fn seal(&self, pin: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| Error::Other(format!("Failed to hash PIN: {:?}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, stored: &str, presented: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(hash) => self
                .hasher
                .verify_password(presented.as_bytes(), &hash)
                .is_ok(),
            // Not a PHC string: a PIN written before hashing was enabled
            Err(_) => stored == presented,
        }
    }
}

/// Build the verifier for a configured scheme
pub fn verifier_for(scheme: PinScheme) -> Arc<dyn CredentialVerifier> {
    match scheme {
        PinScheme::Plaintext => Arc::new(PlaintextPin),
        PinScheme::Argon2 => Arc::new(Argon2Pin::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_compares_exactly() {
        let v = PlaintextPin;
        let sealed = v.seal("1234").unwrap();
        assert_eq!(sealed, "1234");
        assert!(v.verify(&sealed, "1234"));
        assert!(!v.verify(&sealed, "1235"));
        assert!(!v.verify(&sealed, " 1234"));
    }

    #[test]
    fn test_argon2_round_trip() {
        let v = Argon2Pin::new();
        let sealed = v.seal("1234").unwrap();
        assert!(sealed.starts_with("$argon2"));
        assert!(v.verify(&sealed, "1234"));
        assert!(!v.verify(&sealed, "4321"));
    }

    #[test]
    fn test_argon2_accepts_legacy_plaintext() {
        let v = Argon2Pin::new();
        assert!(v.verify("9876", "9876"));
        assert!(!v.verify("9876", "0000"));
    }

    #[test]
    fn test_verifier_for_scheme() {
        assert_eq!(verifier_for(PinScheme::Plaintext).scheme(), "plaintext");
        assert_eq!(verifier_for(PinScheme::Argon2).scheme(), "argon2");
    }
}
