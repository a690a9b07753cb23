//! Dashboard routes.

use actix_web::{web, HttpResponse};

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::dashboard;

/// GET /api/dashboard/learner
async fn learner(db: Db, current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    let view = dashboard::learner(&db, &current_user).await?;
    Ok(envelope::ok(view))
}

/// GET /api/dashboard/instructor
async fn instructor(db: Db, current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    let view = dashboard::instructor(&db, &current_user).await?;
    Ok(envelope::ok(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/learner").route(web::get().to(learner)));
    cfg.service(web::resource("/instructor").route(web::get().to(instructor)));
}
