//! Process configuration, read from the environment at startup.

pub mod db;
pub mod runtime;

pub use db::{db_config, DbConfig};
pub use runtime::RuntimeEnv;
