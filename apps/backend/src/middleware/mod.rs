pub mod auth_resolve;
pub mod cors;
pub mod error_boundary;
pub mod request_trace;
pub mod structured_logger;

pub use auth_resolve::AuthResolve;
pub use cors::cors_middleware;
pub use error_boundary::ErrorBoundary;
pub use request_trace::RequestTrace;
pub use structured_logger::StructuredLogger;
