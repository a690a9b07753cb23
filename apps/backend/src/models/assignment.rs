use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Row of the `assignments` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub instructions: Option<String>,
    /// Maximum points a submission can be graded with.
    pub points: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
