use actix_web::web::Data;
use once_cell::sync::OnceCell;

use crate::config::db::{db_config, DbConfig};
use crate::config::runtime::RuntimeEnv;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_config: Option<DbConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Dev,
            db_config: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db_config(mut self, config: DbConfig) -> Self {
        self.db_config = Some(config);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let config = match self.db_config {
            Some(config) => config,
            None => db_config()?,
        };
        Ok(AppState::new(self.env, config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

static SHARED: OnceCell<Data<AppState>> = OnceCell::new();

/// Application-state entry point for assembly.
///
/// In production the composed state is built once and reused for the
/// process lifetime (an optimization, not a correctness requirement). Every
/// other runtime rebuilds per call so hot-reload and tests stay isolated.
pub fn shared_state(env: RuntimeEnv) -> Result<Data<AppState>, AppError> {
    if env.is_prod() {
        SHARED
            .get_or_try_init(|| Ok(Data::new(build_state().with_env(env).build()?)))
            .cloned()
    } else {
        Ok(Data::new(build_state().with_env(env).build()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_explicit_config_skips_env() {
        let state = build_state()
            .with_env(RuntimeEnv::Test)
            .with_db_config(DbConfig {
                base_url: "https://db.example.test".to_string(),
                anon_key: "anon".to_string(),
            })
            .build()
            .unwrap();
        assert_eq!(state.env(), RuntimeEnv::Test);
        assert_eq!(state.db_config().base_url, "https://db.example.test");
    }
}
