use crate::config::db::DbConfig;
use crate::config::runtime::RuntimeEnv;

/// Application state containing shared, read-only resources.
///
/// Constructed once per composition (see `infra::state`); after that nothing
/// in here mutates. The `reqwest::Client` is the process-wide HTTP
/// transport; per-request identity lives in the scoped `Db` built by the
/// auth middleware, never here.
#[derive(Debug, Clone)]
pub struct AppState {
    env: RuntimeEnv,
    db_config: DbConfig,
    /// Shared HTTP transport for the hosted database service.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(env: RuntimeEnv, db_config: DbConfig) -> Self {
        Self {
            env,
            db_config,
            http: reqwest::Client::new(),
        }
    }

    pub fn env(&self) -> RuntimeEnv {
        self.env
    }

    pub fn db_config(&self) -> &DbConfig {
        &self.db_config
    }

    /// Test state pointed at a caller-controlled upstream (usually a mock
    /// server).
    pub fn for_tests(base_url: &str) -> Self {
        Self::new(
            RuntimeEnv::Test,
            DbConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                anon_key: "test-anon-key".to_string(),
            },
        )
    }
}
