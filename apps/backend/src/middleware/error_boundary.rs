//! Error-boundary middleware
//!
//! Outermost stage of the chain: anything that escapes inner middleware or
//! a handler (a typed `AppError`, a framework error such as a malformed
//! JSON payload, or a panic) leaves this layer as the uniform
//! `{"error":{"code","message"}}` JSON body. Typed errors keep their own
//! code and status; everything else is mapped best-effort by status class.

use std::panic::AssertUnwindSafe;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use futures_util::FutureExt;

use crate::error::{AppError, ErrorBody};
use crate::errors::ErrorCode;

pub struct ErrorBoundary;

impl<S, B> Transform<S, ServiceRequest> for ErrorBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorBoundaryMiddleware { service }))
    }
}

pub struct ErrorBoundaryMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Keep a handle to the request so a failure can still be answered.
        let http_req = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => {
                    // Extractor and payload errors are rendered inside the
                    // route service with their own body shape; rewrap them.
                    let rewrapped = res
                        .response()
                        .error()
                        .filter(|err| err.as_error::<AppError>().is_none())
                        .map(render_error);
                    match rewrapped {
                        Some(response) => Ok(ServiceResponse::new(http_req, response)),
                        None => Ok(res.map_into_boxed_body()),
                    }
                }
                Ok(Err(err)) => {
                    let response = render_error(&err);
                    Ok(ServiceResponse::new(http_req, response))
                }
                Err(panic) => {
                    tracing::error!(
                        detail = %panic_message(panic.as_ref()),
                        message = "request_panicked"
                    );
                    let response = HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(
                        ErrorBody::new(ErrorCode::Internal.as_str(), "Internal server error"),
                    );
                    Ok(ServiceResponse::new(http_req, response))
                }
            }
        })
    }
}

fn render_error(err: &Error) -> HttpResponse {
    // Typed application errors already render the uniform envelope.
    if err.as_error::<AppError>().is_some() {
        return err.error_response();
    }

    let status = err.as_response_error().status_code();
    let code = if status.is_client_error() {
        ErrorCode::BadRequest
    } else {
        ErrorCode::Internal
    };
    HttpResponse::build(status).json(ErrorBody::new(code.as_str(), err.to_string()))
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::error::AppError;

    async fn panicking_handler() -> HttpResponse {
        panic!("handler blew up");
    }

    async fn typed_error_handler() -> Result<HttpResponse, AppError> {
        Err(AppError::not_found(
            ErrorCode::CourseNotFound,
            "Course 9 not found",
        ))
    }

    #[actix_web::test]
    async fn converts_panics_into_uniform_500() {
        let app = test::init_service(
            App::new()
                .route("/boom", web::get().to(panicking_handler))
                .wrap(ErrorBoundary),
        )
        .await;

        let req = test::TestRequest::get().uri("/boom").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn typed_errors_keep_their_code_and_status() {
        let app = test::init_service(
            App::new()
                .route("/missing", web::get().to(typed_error_handler))
                .wrap(ErrorBoundary),
        )
        .await;

        let req = test::TestRequest::get().uri("/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "COURSE_NOT_FOUND");
        assert_eq!(body["error"]["message"], "Course 9 not found");
    }
}
