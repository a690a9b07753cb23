//! Profile routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::Db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::http::envelope;
use crate::services::profiles;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

/// GET /api/profile: the current user's profile.
async fn me(db: Db, current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    let profile = profiles::me(&db, &current_user).await?;
    Ok(envelope::ok(profile))
}

/// PATCH /api/profile: update display name.
async fn update(
    db: Db,
    current_user: CurrentUser,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile =
        profiles::update_display_name(&db, &current_user, body.into_inner().display_name).await?;
    Ok(envelope::ok(profile))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(me))
            .route(web::patch().to(update)),
    );
}
