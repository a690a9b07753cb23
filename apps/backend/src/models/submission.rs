use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Row of the `submissions` table. Grading fields stay null until an
/// instructor grades the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub learner_id: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub graded_at: Option<OffsetDateTime>,
    pub graded_by: Option<String>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}
