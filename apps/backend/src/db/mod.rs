//! Scoped client for the hosted database service.
//!
//! A fresh `Db` is built per request by the auth-resolution middleware,
//! carrying the public anon key and, when a credential was resolved, the
//! caller's bearer token. Row-level policies downstream evaluate every
//! query as that identity.

pub mod client;
pub mod query;

pub use client::{AuthUser, Db};
pub use query::Query;
