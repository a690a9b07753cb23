use tracing::info;

use crate::db::query::Order;
use crate::db::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::models::{Enrollment, EnrollmentWithCourse};
use crate::services::courses;

/// Enroll the current user in a published course.
pub async fn enroll(db: &Db, user: &CurrentUser, course_id: i64) -> Result<Enrollment, AppError> {
    let course = courses::get_course(db, course_id).await?;
    if !course.published {
        return Err(AppError::invalid("Course is not open for enrollment"));
    }

    if is_enrolled(db, &user.id, course_id).await? {
        return Err(AppError::conflict(
            ErrorCode::AlreadyEnrolled,
            format!("Already enrolled in course {course_id}"),
        ));
    }

    let enrollment: Enrollment = db
        .from("enrollments")
        .insert(&serde_json::json!({
            "course_id": course_id,
            "learner_id": user.id,
        }))
        .fetch_one()
        .await?;

    info!(course_id = course_id, "learner enrolled");
    Ok(enrollment)
}

/// The current user's enrollments, newest first, with courses embedded.
pub async fn list_mine(db: &Db, user: &CurrentUser) -> Result<Vec<EnrollmentWithCourse>, AppError> {
    db.from("enrollments")
        .select("*,course:courses(*)")
        .eq("learner_id", &user.id)
        .order("enrolled_at", Order::Desc)
        .fetch_all()
        .await
}

/// Drop the current user's enrollment in a course.
pub async fn withdraw(db: &Db, user: &CurrentUser, course_id: i64) -> Result<(), AppError> {
    let deleted: Vec<Enrollment> = db
        .from("enrollments")
        .eq("course_id", course_id)
        .eq("learner_id", &user.id)
        .delete()
        .fetch_all()
        .await?;

    if deleted.is_empty() {
        return Err(AppError::not_found(
            ErrorCode::EnrollmentNotFound,
            format!("Not enrolled in course {course_id}"),
        ));
    }

    info!(course_id = course_id, "learner withdrew");
    Ok(())
}

pub async fn is_enrolled(db: &Db, learner_id: &str, course_id: i64) -> Result<bool, AppError> {
    let existing: Vec<Enrollment> = db
        .from("enrollments")
        .select("*")
        .eq("course_id", course_id)
        .eq("learner_id", learner_id)
        .limit(1)
        .fetch_all()
        .await?;
    Ok(!existing.is_empty())
}
