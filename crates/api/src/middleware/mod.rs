//! Request extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated actor, taken from a JWT Bearer token.

pub mod auth;
