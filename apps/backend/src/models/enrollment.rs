use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::course::Course;

/// Row of the `enrollments` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub learner_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub enrolled_at: OffsetDateTime,
}

/// Enrollment with its course embedded, as returned by
/// `select("*,course:courses(*)")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_course_deserializes() {
        let row = serde_json::json!({
            "id": 3,
            "course_id": 7,
            "learner_id": "user-1",
            "enrolled_at": "2026-02-01T09:30:00Z",
            "course": {
                "id": 7,
                "title": "Intro to Rust",
                "description": null,
                "instructor_id": "user-2",
                "published": true,
                "created_at": "2026-01-05T10:00:00Z",
            },
        });
        let enrollment: EnrollmentWithCourse = serde_json::from_value(row).unwrap();
        assert_eq!(enrollment.enrollment.course_id, 7);
        assert_eq!(enrollment.course.title, "Intro to Rust");
    }
}
