//! Enrollment routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::enrollments;

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

/// POST /api/enrollments: enroll the current user.
async fn enroll(
    db: Db,
    current_user: CurrentUser,
    body: web::Json<EnrollRequest>,
) -> Result<HttpResponse, AppError> {
    let enrollment = enrollments::enroll(&db, &current_user, body.course_id).await?;
    Ok(envelope::created(enrollment))
}

/// GET /api/enrollments: the current user's enrollments.
async fn list_mine(db: Db, current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    let listing = enrollments::list_mine(&db, &current_user).await?;
    Ok(envelope::ok(listing))
}

/// DELETE /api/enrollments/{course_id}: drop a course.
async fn withdraw(
    db: Db,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    enrollments::withdraw(&db, &current_user, path.into_inner()).await?;
    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_mine))
            .route(web::post().to(enroll)),
    );
    cfg.service(web::resource("/{course_id}").route(web::delete().to(withdraw)));
}
