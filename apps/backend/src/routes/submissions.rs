//! Submission and grading routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::submissions;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub grade: i32,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// GET /api/submissions/{submission_id}: author or owning instructor.
async fn get_submission(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let submission = submissions::get_submission(&db, &current_user, path.into_inner()).await?;
    Ok(envelope::ok(submission))
}

/// POST /api/submissions/{submission_id}/grade: owning instructor.
async fn grade(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<GradeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let graded = submissions::grade(
        &db,
        &current_user,
        path.into_inner(),
        body.grade,
        body.feedback,
    )
    .await?;
    Ok(envelope::ok(graded))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{submission_id}").route(web::get().to(get_submission)));
    cfg.service(web::resource("/{submission_id}/grade").route(web::post().to(grade)));
}
