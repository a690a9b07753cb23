use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Role a profile holds in the system.
///
/// Operators satisfy any role requirement; the role check lives in
/// `services::profiles::require_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Learner,
    Instructor,
    Operator,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => "learner",
            Self::Instructor => "instructor",
            Self::Operator => "operator",
        }
    }
}

/// Row of the `profiles` table; `id` is the auth provider's user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
