use std::env;

use crate::error::AppError;

/// Connection settings for the hosted database service.
///
/// The service is reached over its REST interface; `anon_key` is the public
/// anonymous key sent as the `apikey` header on every outbound call.
/// Row-level policies downstream decide what each identity may touch.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Base URL of the hosted service, without a trailing slash.
    pub base_url: String,
    /// Public anonymous API key.
    pub anon_key: String,
}

/// Builds the database client configuration from environment variables.
///
/// Both variables are required; a missing one is a configuration error and
/// must fail the process (or the request) loudly rather than degrade.
pub fn db_config() -> Result<DbConfig, AppError> {
    let base_url = must_var("BACKEND_DB_URL")?;
    let anon_key = must_var("BACKEND_DB_ANON_KEY")?;

    Ok(DbConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        anon_key,
    })
}

/// Get required environment variable or return a configuration error.
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            AppError::config(format!(
                "Required environment variable '{name}' is not set"
            ))
        })
}
