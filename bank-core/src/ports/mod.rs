//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod credential;
mod repository;
mod session;

pub use credential::CredentialVerifier;
pub use repository::LedgerStore;
pub use session::SessionStore;
