use tracing::info;

use crate::db::query::Order;
use crate::db::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::models::Submission;
use crate::services::{assignments, courses, enrollments};

/// Submit work for an assignment. The learner must be enrolled in the
/// assignment's course and may submit once.
pub async fn submit(
    db: &Db,
    user: &CurrentUser,
    assignment_id: i64,
    body: String,
) -> Result<Submission, AppError> {
    let body = body.trim().to_string();
    if body.is_empty() {
        return Err(AppError::invalid("Submission body cannot be empty"));
    }

    let assignment = assignments::get_assignment(db, assignment_id).await?;

    if !enrollments::is_enrolled(db, &user.id, assignment.course_id).await? {
        return Err(AppError::forbidden("Not enrolled in this course"));
    }

    let existing: Vec<Submission> = db
        .from("submissions")
        .select("*")
        .eq("assignment_id", assignment_id)
        .eq("learner_id", &user.id)
        .limit(1)
        .fetch_all()
        .await?;
    if !existing.is_empty() {
        return Err(AppError::conflict(
            ErrorCode::AlreadySubmitted,
            format!("Already submitted for assignment {assignment_id}"),
        ));
    }

    let submission: Submission = db
        .from("submissions")
        .insert(&serde_json::json!({
            "assignment_id": assignment_id,
            "learner_id": user.id,
            "body": body,
        }))
        .fetch_one()
        .await?;

    info!(
        assignment_id = assignment_id,
        submission_id = submission.id,
        "submission received"
    );
    Ok(submission)
}

/// All submissions for an assignment, for the instructor managing its
/// course.
pub async fn list_for_assignment(
    db: &Db,
    user: &CurrentUser,
    assignment_id: i64,
) -> Result<Vec<Submission>, AppError> {
    let assignment = assignments::get_assignment(db, assignment_id).await?;
    courses::owned_course(db, user, assignment.course_id).await?;

    db.from("submissions")
        .select("*")
        .eq("assignment_id", assignment_id)
        .order("submitted_at", Order::Asc)
        .fetch_all()
        .await
}

/// One submission, visible to its author and to the instructor managing
/// the course.
pub async fn get_submission(
    db: &Db,
    user: &CurrentUser,
    submission_id: i64,
) -> Result<Submission, AppError> {
    let submission = fetch_submission(db, submission_id).await?;

    if submission.learner_id != user.id {
        let assignment = assignments::get_assignment(db, submission.assignment_id).await?;
        courses::owned_course(db, user, assignment.course_id).await?;
    }

    Ok(submission)
}

/// Grade a submission. Only the instructor managing the course may grade;
/// the grade must fit the assignment's point scale.
pub async fn grade(
    db: &Db,
    user: &CurrentUser,
    submission_id: i64,
    grade: i32,
    feedback: Option<String>,
) -> Result<Submission, AppError> {
    let submission = fetch_submission(db, submission_id).await?;
    let assignment = assignments::get_assignment(db, submission.assignment_id).await?;
    courses::owned_course(db, user, assignment.course_id).await?;

    if grade < 0 || grade > assignment.points {
        return Err(AppError::invalid(format!(
            "Grade must be between 0 and {}",
            assignment.points
        )));
    }

    let graded_at = now_rfc3339()?;

    let graded: Submission = db
        .from("submissions")
        .eq("id", submission_id)
        .update(&serde_json::json!({
            "grade": grade,
            "feedback": feedback,
            "graded_at": graded_at,
            "graded_by": user.id,
        }))
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::SubmissionNotFound,
                format!("Submission {submission_id} not found"),
            )
        })?;

    info!(
        submission_id = submission_id,
        grade = grade,
        "submission graded"
    );
    Ok(graded)
}

async fn fetch_submission(db: &Db, submission_id: i64) -> Result<Submission, AppError> {
    db.from("submissions")
        .select("*")
        .eq("id", submission_id)
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::SubmissionNotFound,
                format!("Submission {submission_id} not found"),
            )
        })
}

fn now_rfc3339() -> Result<String, AppError> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| AppError::internal(format!("timestamp formatting failed: {e}")))
}
