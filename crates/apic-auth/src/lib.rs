//! Credential verification and token lifecycle.
//!
//! Argon2 password hashing, HS256 JWT issuance and decoding, and a
//! best-effort revocation marker kept in an external key-value registry.
//!
//! ## Credentials
//!
//! - [`Credentials`] — Submitted username and password, with [`Credentials::verify`]
//! - [`Member`] — Stored user record (id `0` means not found)
//! - [`password`] — Argon2 hashing and verification
//!
//! ## Tokens
//!
//! - [`Crypto`] — Token manager: issue, verify, decode, revoke
//! - [`Claims`] — JWT payload: username, role, expiry
//! - [`Revocation`] — Single-slot or denylist revocation bookkeeping
//!
//! ## Collaborators
//!
//! - [`Directory`] — Username lookup, with in-memory [`Roster`]
//! - [`Registry`] — Key-value marker store, with in-memory [`Ledger`]
mod claims;
mod credentials;
mod crypto;
mod directory;
mod dto;
mod error;
mod member;
pub mod password;
mod registry;
mod revocation;

pub use claims::*;
pub use credentials::*;
pub use crypto::*;
pub use directory::*;
pub use dto::*;
pub use error::*;
pub use member::*;
pub use registry::*;
pub use revocation::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
