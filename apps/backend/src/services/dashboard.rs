use serde::Serialize;

use crate::db::query::Order;
use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::models::{Assignment, Course, EnrollmentWithCourse, Role, Submission};
use crate::services::profiles;

/// Aggregated view for a learner's home screen.
#[derive(Debug, Serialize)]
pub struct LearnerDashboard {
    pub enrollment_count: usize,
    pub submission_count: usize,
    pub graded_count: usize,
    pub average_grade: Option<f64>,
    pub recent_enrollments: Vec<EnrollmentWithCourse>,
}

/// Aggregated view for an instructor's home screen.
#[derive(Debug, Serialize)]
pub struct InstructorDashboard {
    pub course_count: usize,
    pub assignment_count: usize,
    pub pending_submissions: usize,
}

const RECENT_ENROLLMENTS: usize = 5;

pub async fn learner(db: &Db, user: &CurrentUser) -> Result<LearnerDashboard, AppError> {
    let enrollments: Vec<EnrollmentWithCourse> = db
        .from("enrollments")
        .select("*,course:courses(*)")
        .eq("learner_id", &user.id)
        .order("enrolled_at", Order::Desc)
        .fetch_all()
        .await?;

    let submissions: Vec<Submission> = db
        .from("submissions")
        .select("*")
        .eq("learner_id", &user.id)
        .fetch_all()
        .await?;

    let grades: Vec<i32> = submissions.iter().filter_map(|s| s.grade).collect();
    let average_grade = if grades.is_empty() {
        None
    } else {
        Some(grades.iter().copied().sum::<i32>() as f64 / grades.len() as f64)
    };

    let enrollment_count = enrollments.len();
    let mut recent_enrollments = enrollments;
    recent_enrollments.truncate(RECENT_ENROLLMENTS);

    Ok(LearnerDashboard {
        enrollment_count,
        submission_count: submissions.len(),
        graded_count: grades.len(),
        average_grade,
        recent_enrollments,
    })
}

pub async fn instructor(db: &Db, user: &CurrentUser) -> Result<InstructorDashboard, AppError> {
    profiles::require_role(db, &user.id, Role::Instructor).await?;

    let courses: Vec<Course> = db
        .from("courses")
        .select("*")
        .eq("instructor_id", &user.id)
        .fetch_all()
        .await?;

    if courses.is_empty() {
        return Ok(InstructorDashboard {
            course_count: 0,
            assignment_count: 0,
            pending_submissions: 0,
        });
    }

    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    let assignments: Vec<Assignment> = db
        .from("assignments")
        .select("*")
        .in_list("course_id", &course_ids)
        .fetch_all()
        .await?;

    let pending_submissions = if assignments.is_empty() {
        0
    } else {
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let pending: Vec<Submission> = db
            .from("submissions")
            .select("*")
            .in_list("assignment_id", &assignment_ids)
            .is_null("grade", true)
            .fetch_all()
            .await?;
        pending.len()
    };

    Ok(InstructorDashboard {
        course_count: courses.len(),
        assignment_count: assignments.len(),
        pending_submissions,
    })
}
