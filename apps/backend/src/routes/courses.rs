//! Course catalog routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::assignments::{self, NewAssignment};
use crate::services::courses::{self, CourseUpdate, NewCourse};

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    pub points: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
}

/// GET /api/courses: published catalog; anonymous access allowed.
async fn list_courses(db: Db) -> Result<HttpResponse, AppError> {
    let catalog = courses::list_catalog(&db).await?;
    Ok(envelope::ok(catalog))
}

/// GET /api/courses/{course_id}
async fn get_course(db: Db, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let course = courses::get_course(&db, path.into_inner()).await?;
    Ok(envelope::ok(course))
}

/// POST /api/courses: instructors only.
async fn create_course(
    db: Db,
    current_user: CurrentUser,
    body: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let course = courses::create_course(
        &db,
        &current_user,
        NewCourse {
            title: body.title,
            description: body.description,
            published: body.published,
        },
    )
    .await?;
    Ok(envelope::created(course))
}

/// PATCH /api/courses/{course_id}: owning instructor.
async fn update_course(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let course = courses::update_course(
        &db,
        &current_user,
        path.into_inner(),
        CourseUpdate {
            title: body.title,
            description: body.description,
            published: body.published,
        },
    )
    .await?;
    Ok(envelope::ok(course))
}

/// DELETE /api/courses/{course_id}: owning instructor.
async fn delete_course(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    courses::delete_course(&db, &current_user, path.into_inner()).await?;
    Ok(envelope::ok_empty())
}

/// GET /api/courses/{course_id}/assignments: enrolled learner or owner.
async fn list_assignments(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let listing = assignments::list_for_course(&db, &current_user, path.into_inner()).await?;
    Ok(envelope::ok(listing))
}

/// POST /api/courses/{course_id}/assignments: owning instructor.
async fn create_assignment(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<CreateAssignmentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let assignment = assignments::create(
        &db,
        &current_user,
        path.into_inner(),
        NewAssignment {
            title: body.title,
            instructions: body.instructions,
            points: body.points,
            due_at: body.due_at,
        },
    )
    .await?;
    Ok(envelope::created(assignment))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_courses))
            .route(web::post().to(create_course)),
    );
    cfg.service(
        web::resource("/{course_id}")
            .route(web::get().to(get_course))
            .route(web::patch().to(update_course))
            .route(web::delete().to(delete_course)),
    );
    cfg.service(
        web::resource("/{course_id}/assignments")
            .route(web::get().to(list_assignments))
            .route(web::post().to(create_assignment)),
    );
}
