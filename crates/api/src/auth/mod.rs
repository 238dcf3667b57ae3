//! Access token handling.
//!
//! - [`jwt`] -- JWT validation against the identity provider's shared secret.

pub mod jwt;
