//! Credential port - how PINs are sealed and checked

use crate::domain::result::Result;

/// Seals PINs for storage and checks presented PINs against stored ones
///
/// Call sites never compare PINs themselves, so the storage scheme can change
/// without touching the services.
pub trait CredentialVerifier: Send + Sync {
    /// Scheme name as written in settings (`plaintext`, `argon2`)
    fn scheme(&self) -> &'static str;

    /// Turn a freshly chosen PIN into its stored form
    fn seal(&self, pin: &str) -> Result<String>;

    /// Does `presented` match the stored value?
    fn verify(&self, stored: &str, presented: &str) -> bool;
}
