use tracing::info;

use crate::db::query::Order;
use crate::db::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::models::{Course, Role};
use crate::services::profiles;

/// Fields for a new course. Built by the route handler from the request
/// body; the instructor is always the current user.
#[derive(Debug)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

impl CourseUpdate {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.published.is_none()
    }
}

/// Published courses, newest first. Anonymous access is fine here.
pub async fn list_catalog(db: &Db) -> Result<Vec<Course>, AppError> {
    db.from("courses")
        .select("*")
        .eq("published", true)
        .order("created_at", Order::Desc)
        .fetch_all()
        .await
}

pub async fn get_course(db: &Db, course_id: i64) -> Result<Course, AppError> {
    db.from("courses")
        .select("*")
        .eq("id", course_id)
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::CourseNotFound,
                format!("Course {course_id} not found"),
            )
        })
}

pub async fn create_course(
    db: &Db,
    user: &CurrentUser,
    new: NewCourse,
) -> Result<Course, AppError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::invalid("Course title cannot be empty"));
    }

    profiles::require_role(db, &user.id, Role::Instructor).await?;

    let course: Course = db
        .from("courses")
        .insert(&serde_json::json!({
            "title": title,
            "description": new.description,
            "instructor_id": user.id,
            "published": new.published,
        }))
        .fetch_one()
        .await?;

    info!(course_id = course.id, "course created");
    Ok(course)
}

pub async fn update_course(
    db: &Db,
    user: &CurrentUser,
    course_id: i64,
    update: CourseUpdate,
) -> Result<Course, AppError> {
    if update.is_empty() {
        return Err(AppError::invalid("At least one field must be provided"));
    }
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(AppError::invalid("Course title cannot be empty"));
        }
    }

    owned_course(db, user, course_id).await?;

    let mut patch = serde_json::Map::new();
    if let Some(title) = update.title {
        patch.insert("title".into(), serde_json::json!(title.trim()));
    }
    if let Some(description) = update.description {
        patch.insert("description".into(), serde_json::json!(description));
    }
    if let Some(published) = update.published {
        patch.insert("published".into(), serde_json::json!(published));
    }

    db.from("courses")
        .eq("id", course_id)
        .update(&serde_json::Value::Object(patch))
        .fetch_optional()
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::CourseNotFound,
                format!("Course {course_id} not found"),
            )
        })
}

pub async fn delete_course(db: &Db, user: &CurrentUser, course_id: i64) -> Result<(), AppError> {
    owned_course(db, user, course_id).await?;

    let deleted: Vec<Course> = db
        .from("courses")
        .eq("id", course_id)
        .delete()
        .fetch_all()
        .await?;

    if deleted.is_empty() {
        return Err(AppError::not_found(
            ErrorCode::CourseNotFound,
            format!("Course {course_id} not found"),
        ));
    }

    info!(course_id = course_id, "course deleted");
    Ok(())
}

/// Fetch a course and verify the current user may manage it: its
/// instructor, or an operator.
pub async fn owned_course(
    db: &Db,
    user: &CurrentUser,
    course_id: i64,
) -> Result<Course, AppError> {
    let course = get_course(db, course_id).await?;
    if course.instructor_id == user.id {
        return Ok(course);
    }
    let role = profiles::role_of(db, &user.id).await?;
    if role == Role::Operator {
        return Ok(course);
    }
    Err(AppError::forbidden("Not the course instructor"))
}
