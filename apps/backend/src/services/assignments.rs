use time::OffsetDateTime;
use tracing::info;

use crate::db::query::Order;
use crate::db::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::models::Assignment;
use crate::services::{courses, enrollments};

#[derive(Debug)]
pub struct NewAssignment {
    pub title: String,
    pub instructions: Option<String>,
    pub points: i32,
    pub due_at: Option<OffsetDateTime>,
}

/// Assignments of a course, visible to its instructor and enrolled
/// learners.
pub async fn list_for_course(
    db: &Db,
    user: &CurrentUser,
    course_id: i64,
) -> Result<Vec<Assignment>, AppError> {
    let course = courses::get_course(db, course_id).await?;

    if course.instructor_id != user.id && !enrollments::is_enrolled(db, &user.id, course_id).await?
    {
        return Err(AppError::forbidden("Not enrolled in this course"));
    }

    db.from("assignments")
        .select("*")
        .eq("course_id", course_id)
        .order("created_at", Order::Asc)
        .fetch_all()
        .await
}

/// Create an assignment on a course the current user manages.
pub async fn create(
    db: &Db,
    user: &CurrentUser,
    course_id: i64,
    new: NewAssignment,
) -> Result<Assignment, AppError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::invalid("Assignment title cannot be empty"));
    }
    if new.points <= 0 {
        return Err(AppError::invalid("Assignment points must be positive"));
    }

    courses::owned_course(db, user, course_id).await?;

    let due_at = new
        .due_at
        .map(|due| {
            due.format(&time::format_description::well_known::Rfc3339)
                .map_err(|e| AppError::internal(format!("due date formatting failed: {e}")))
        })
        .transpose()?;

    let assignment: Assignment = db
        .from("assignments")
        .insert(&serde_json::json!({
            "course_id": course_id,
            "title": title,
            "instructions": new.instructions,
            "points": new.points,
            "due_at": due_at,
        }))
        .fetch_one()
        .await?;

    info!(
        course_id = course_id,
        assignment_id = assignment.id,
        "assignment created"
    );
    Ok(assignment)
}

pub async fn get_assignment(db: &Db, assignment_id: i64) -> Result<Assignment, AppError> {
    db.from("assignments")
        .select("*")
        .eq("id", assignment_id)
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::AssignmentNotFound,
                format!("Assignment {assignment_id} not found"),
            )
        })
}
