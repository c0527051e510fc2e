//! Authentication primitives for the coffee-shop service.
//!
//! - [`jwt`] -- bearer-token extraction, RS256 verification, permission checks.
//! - [`keys`] -- identity-provider key material (JWKS or PEM).
//! - [`error`] -- [`AuthError`], the gate's status + description pair.

pub mod error;
pub mod jwt;
pub mod keys;

pub use error::AuthError;
pub use jwt::{Claims, TokenVerifier};
pub use keys::KeySet;
