//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON file (and in-memory) ledger stores for LedgerStore
//! - Plaintext and Argon2 PIN schemes for CredentialVerifier
//! - A JSON session file for SessionStore

pub mod credential;
pub mod json_file;
pub mod memory;
pub mod session_file;

pub use credential::{verifier_for, Argon2Pin, PlaintextPin};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use session_file::FileSessionStore;
