use std::env;

/// Runtime environment the process was started in.
///
/// Controls the application-state singleton policy: production reuses one
/// composed state for the process lifetime, every other environment rebuilds
/// per call so hot-reload and tests stay isolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Dev,
    Test,
}

impl RuntimeEnv {
    /// Resolve from `BACKEND_ENV`; anything unrecognized falls back to Dev.
    pub fn from_env() -> Self {
        match env::var("BACKEND_ENV").as_deref() {
            Ok("prod") | Ok("production") => Self::Prod,
            Ok("test") => Self::Test,
            _ => Self::Dev,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }

    pub const fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}
