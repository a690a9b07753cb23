//! Auth-resolution middleware
//!
//! Resolves the request's credential (provider session cookie first, then
//! `Authorization: Bearer` fallback) and attaches a database client scoped
//! to that identity to the request extensions. A missing or undecodable
//! credential is not an error here: the client degrades to anonymous and
//! individual routes decide whether that becomes a 401.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::credentials::resolve_access_token;
use crate::db::Db;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct AuthResolve;

impl<S, B> Transform<S, ServiceRequest> for AuthResolve
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthResolveMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthResolveMiddleware { service }))
    }
}

pub struct AuthResolveMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthResolveMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // AppState must have been attached by application assembly; its
        // absence is a deployment mistake, not a request error.
        let app_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.clone(),
            None => {
                return Box::pin(async {
                    Err(AppError::config("application state not configured").into())
                });
            }
        };

        let cookie_header = req
            .headers()
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let token = resolve_access_token(cookie_header.as_deref(), authorization.as_deref());
        if token.is_none() {
            tracing::debug!("no credential resolved; proceeding anonymously");
        }

        let db = Db::new(app_state.http.clone(), app_state.db_config(), token);
        req.extensions_mut().insert(db);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpMessage, HttpRequest, HttpResponse};

    use super::*;
    use crate::config::db::DbConfig;
    use crate::state::app_state::AppState;

    async fn probe(req: HttpRequest) -> HttpResponse {
        let bearer = req
            .extensions()
            .get::<Db>()
            .and_then(|db| db.bearer().map(str::to_string));
        HttpResponse::Ok().json(serde_json::json!({ "bearer": bearer }))
    }

    fn test_state() -> AppState {
        AppState::new(
            crate::config::runtime::RuntimeEnv::Test,
            DbConfig {
                base_url: "https://db.example.test".to_string(),
                anon_key: "anon-key".to_string(),
            },
        )
    }

    #[actix_web::test]
    async fn attaches_anonymous_client_without_credentials() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .wrap(AuthResolve)
                .route("/probe", web::get().to(probe)),
        )
        .await;

        let req = test::TestRequest::get().uri("/probe").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["bearer"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn attaches_scoped_client_from_bearer_header() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .wrap(AuthResolve)
                .route("/probe", web::get().to(probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/probe")
            .insert_header(("Authorization", "Bearer abc123"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["bearer"], "abc123");
    }

    #[actix_web::test]
    async fn missing_app_state_is_a_config_error() {
        let app = test::init_service(
            App::new()
                .route("/probe", web::get().to(probe))
                .wrap(AuthResolve)
                .wrap(crate::middleware::error_boundary::ErrorBoundary),
        )
        .await;

        let req = test::TestRequest::get().uri("/probe").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "CONFIG_ERROR");
    }
}
