use actix_web::{web, HttpRequest, HttpResponse};
use actix_web::error::ResponseError;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod assignments;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod health;
pub mod profiles;
pub mod submissions;

/// Configure application routes.
///
/// Registered identically in production assembly (`main.rs`) and the test
/// harness (`test_support::app_builder`) so endpoint behavior matches.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Course catalog routes: /api/courses/**
    cfg.service(web::scope("/api/courses").configure(courses::configure_routes));

    // Enrollment routes: /api/enrollments/**
    cfg.service(web::scope("/api/enrollments").configure(enrollments::configure_routes));

    // Assignment routes: /api/assignments/**
    cfg.service(web::scope("/api/assignments").configure(assignments::configure_routes));

    // Submission routes: /api/submissions/**
    cfg.service(web::scope("/api/submissions").configure(submissions::configure_routes));

    // Dashboard routes: /api/dashboard/**
    cfg.service(web::scope("/api/dashboard").configure(dashboard::configure_routes));

    // Profile routes: /api/profile
    cfg.service(web::scope("/api/profile").configure(profiles::configure_routes));
}

/// Catch-all for unmatched method/path combinations.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    AppError::not_found(
        ErrorCode::NotFound,
        format!("Route not found: {} {}", req.method(), req.path()),
    )
    .error_response()
}
