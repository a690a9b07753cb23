use actix_web::{web, HttpResponse};

use crate::error::AppError;

/// Liveness probe; deliberately does not touch the database.
async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
