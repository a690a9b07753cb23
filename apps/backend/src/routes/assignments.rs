//! Assignment routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::{assignments, submissions};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub body: String,
}

/// GET /api/assignments/{assignment_id}
async fn get_assignment(
    db: Db,
    _current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let assignment = assignments::get_assignment(&db, path.into_inner()).await?;
    Ok(envelope::ok(assignment))
}

/// POST /api/assignments/{assignment_id}/submissions: enrolled learner.
async fn submit(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<SubmitRequest>,
) -> Result<HttpResponse, AppError> {
    let submission =
        submissions::submit(&db, &current_user, path.into_inner(), body.into_inner().body).await?;
    Ok(envelope::created(submission))
}

/// GET /api/assignments/{assignment_id}/submissions: owning instructor.
async fn list_submissions(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let listing =
        submissions::list_for_assignment(&db, &current_user, path.into_inner()).await?;
    Ok(envelope::ok(listing))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{assignment_id}").route(web::get().to(get_assignment)));
    cfg.service(
        web::resource("/{assignment_id}/submissions")
            .route(web::get().to(list_submissions))
            .route(web::post().to(submit)),
    );
}
