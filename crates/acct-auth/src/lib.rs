//! Authentication and authorization for the account service.
//!
//! Stateless JWT sessions with Argon2 password hashing, and a single
//! policy table deciding who may act on which account.
//!
//! ## Identity Types
//!
//! - [`Account`] — Registered user owned by the directory
//! - [`Caller`] — Verified token subject for one request
//! - [`Directory`] — Account store contract, with the in-memory [`Memory`]
//!
//! ## Security
//!
//! - [`password`] — Argon2 hashing and verification
//! - [`Claims`] — JWT payload structure
//! - [`Crypto`] — JWT signing and verification
//! - [`session::issue`] — Credentials in, token out
//! - [`policy`] — Per-operation allow/deny decisions
mod account;
mod caller;
mod claims;
mod crypto;
mod directory;
mod dto;
mod error;
pub mod password;
pub mod policy;
pub mod session;

pub use account::*;
pub use caller::*;
pub use claims::*;
pub use crypto::*;
pub use directory::*;
pub use dto::*;
pub use error::*;
pub use policy::Decision;
pub use policy::Entitlement;
pub use policy::Operation;

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
