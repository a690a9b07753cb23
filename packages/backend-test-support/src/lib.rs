//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing:
//! assertions for the stable error-envelope contract and unified logging
//! initialization.

pub mod error_body;
pub mod test_logging;

pub use error_body::{assert_error_body_from_parts, assert_error_body_from_service_response};
