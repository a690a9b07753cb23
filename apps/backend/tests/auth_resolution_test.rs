//! Credential-resolution behavior of the middleware chain, observed from
//! inside a route handler through the scoped client.

use actix_web::{test, web, HttpResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use backend::db::Db;
use backend::state::app_state::AppState;
use backend::test_support::create_test_app_builder;
use backend::AppError;

async fn probe(db: Db) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "anonymous": db.is_anonymous(),
        "bearer": db.bearer(),
    })))
}

fn session_cookie(name: &str, access_token: &str) -> String {
    let payload = serde_json::json!({
        "access_token": access_token,
        "refresh_token": "refresh-opaque",
    });
    format!("{name}=base64-{}", STANDARD.encode(payload.to_string()))
}

async fn probe_app(
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    Error = actix_web::Error,
> {
    create_test_app_builder(AppState::for_tests("https://db.example.test"))
        .with_routes(|cfg| {
            cfg.route("/_test/probe", web::get().to(probe));
        })
        .build()
        .await
        .expect("build test app")
}

#[actix_web::test]
async fn no_credentials_resolves_to_anonymous() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    let req = test::TestRequest::get().uri("/_test/probe").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["anonymous"], true);
    assert_eq!(body["bearer"], serde_json::Value::Null);
}

#[actix_web::test]
async fn provider_cookie_resolves_exact_token() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    let req = test::TestRequest::get()
        .uri("/_test/probe")
        .insert_header((
            "cookie",
            session_cookie("sb-projectref-auth-token", "cookie-token-123"),
        ))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["anonymous"], false);
    assert_eq!(body["bearer"], "cookie-token-123");
}

#[actix_web::test]
async fn code_verifier_cookie_is_excluded() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    // Matches the prefix/suffix naively; the exclusion rule must win.
    let req = test::TestRequest::get()
        .uri("/_test/probe")
        .insert_header((
            "cookie",
            session_cookie("sb-projectref-code-verifier-auth-token", "pkce-token"),
        ))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["anonymous"], true);
}

#[actix_web::test]
async fn malformed_cookie_payload_degrades_to_anonymous() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    let req = test::TestRequest::get()
        .uri("/_test/probe")
        .insert_header(("cookie", "sb-projectref-auth-token=base64-!!!garbage!!!"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Never throws: the request proceeds as if no cookie credential existed.
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["anonymous"], true);
}

#[actix_web::test]
async fn bearer_header_is_the_fallback() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    let req = test::TestRequest::get()
        .uri("/_test/probe")
        .insert_header(("authorization", "bearer header-token-9"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["bearer"], "header-token-9");
}

#[actix_web::test]
async fn cookie_credential_takes_precedence_over_header() {
    backend_test_support::test_logging::init();
    let app = probe_app().await;

    let req = test::TestRequest::get()
        .uri("/_test/probe")
        .insert_header((
            "cookie",
            session_cookie("sb-projectref-auth-token", "cookie-token"),
        ))
        .insert_header(("authorization", "Bearer header-token"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["bearer"], "cookie-token");
}
