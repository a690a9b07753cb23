//! End-to-end flows against a mocked hosted database/auth service.
//!
//! The mock stands in for the REST interface; these tests observe what the
//! scoped client actually sends (identity headers included) and how
//! upstream answers surface through the route layer.

use actix_web::http::StatusCode;
use actix_web::test;
use backend::state::app_state::AppState;
use backend::test_support::create_test_app_builder;
use backend_test_support::assert_error_body_from_service_response;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn course_row(id: i64, title: &str, instructor_id: &str, published: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "An introduction",
        "instructor_id": instructor_id,
        "published": published,
        "created_at": "2026-01-05T10:00:00Z",
    })
}

async fn test_app(
    server: &MockServer,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    Error = actix_web::Error,
> {
    create_test_app_builder(AppState::for_tests(&server.uri()))
        .with_prod_routes()
        .build()
        .await
        .expect("build test app")
}

#[actix_web::test]
async fn bearer_header_identity_reaches_the_auth_endpoint() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    // The provider only answers when the injected bearer arrives intact.
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer abc123"))
        .and(header("apikey", "test-anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-abc",
            "email": "ada@example.com",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.user-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-abc",
            "display_name": "Ada",
            "role": "learner",
            "created_at": "2026-01-02T08:00:00Z",
        })))
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(("authorization", "Bearer abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["id"], "user-abc");
    assert_eq!(body["data"]["role"], "learner");
}

#[actix_web::test]
async fn anonymous_catalog_requests_carry_no_authorization_header() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("published", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            course_row(1, "Intro to Rust", "user-i", true),
        ])))
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    let req = test::TestRequest::get().uri("/api/courses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"][0]["title"], "Intro to Rust");

    // The anonymous client must not have injected an Authorization header.
    let received = server.received_requests().await.unwrap();
    assert!(!received.is_empty());
    for request in &received {
        assert!(
            !request.headers.contains_key("authorization"),
            "anonymous request leaked an Authorization header"
        );
    }
}

#[actix_web::test]
async fn protected_routes_reject_anonymous_callers() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;
    let app = test_app(&server).await;

    let req = test::TestRequest::get().uri("/api/enrollments").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Authentication required"),
    )
    .await;

    // No network call was made for the anonymous caller.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn missing_course_surfaces_as_typed_404() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    // Single-object reads answer 406 when no row matched.
    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("id", "eq.9"))
        .respond_with(ResponseTemplate::new(406))
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    let req = test::TestRequest::get().uri("/api/courses/9").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "COURSE_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Course 9 not found"),
    )
    .await;
}

#[actix_web::test]
async fn enrollment_flow_round_trips_through_the_scoped_client() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer learner-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-l",
            "email": "lee@example.com",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("id", "eq.7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(course_row(7, "Systems", "user-i", true)),
        )
        .mount(&server)
        .await;

    // Not yet enrolled.
    Mock::given(method("GET"))
        .and(path("/rest/v1/enrollments"))
        .and(query_param("course_id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/enrollments"))
        .and(header("authorization", "Bearer learner-tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 31,
            "course_id": 7,
            "learner_id": "user-l",
            "enrolled_at": "2026-02-01T09:30:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(("authorization", "Bearer learner-tok"))
        .set_json(serde_json::json!({"course_id": 7}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["id"], 31);
    assert_eq!(body["data"]["course_id"], 7);
}

#[actix_web::test]
async fn upstream_conflict_surfaces_as_conflict_envelope() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-l",
            "email": null,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("id", "eq.7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(course_row(7, "Systems", "user-i", true)),
        )
        .mount(&server)
        .await;

    // Already enrolled: the service answers the duplicate before insert.
    Mock::given(method("GET"))
        .and(path("/rest/v1/enrollments"))
        .and(query_param("course_id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 31,
            "course_id": 7,
            "learner_id": "user-l",
            "enrolled_at": "2026-02-01T09:30:00Z",
        }])))
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(("authorization", "Bearer learner-tok"))
        .set_json(serde_json::json!({"course_id": 7}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "ALREADY_ENROLLED",
        StatusCode::CONFLICT,
        Some("Already enrolled"),
    )
    .await;
}

#[actix_web::test]
async fn grading_flow_validates_and_records_the_grader() {
    backend_test_support::test_logging::init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer instructor-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-i",
            "email": "ines@example.com",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/submissions"))
        .and(query_param("id", "eq.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "assignment_id": 4,
            "learner_id": "user-l",
            "body": "my answer",
            "submitted_at": "2026-03-01T12:00:00Z",
            "grade": null,
            "feedback": null,
            "graded_at": null,
            "graded_by": null,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/assignments"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4,
            "course_id": 7,
            "title": "Exercise 1",
            "instructions": null,
            "points": 10,
            "due_at": null,
            "created_at": "2026-02-01T10:00:00Z",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("id", "eq.7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(course_row(7, "Systems", "user-i", true)),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/submissions"))
        .and(query_param("id", "eq.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "assignment_id": 4,
            "learner_id": "user-l",
            "body": "my answer",
            "submitted_at": "2026-03-01T12:00:00Z",
            "grade": 9,
            "feedback": "Nearly perfect",
            "graded_at": "2026-03-02T09:00:00Z",
            "graded_by": "user-i",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server).await;

    // Out-of-range grade is rejected before any write.
    let req = test::TestRequest::post()
        .uri("/api/submissions/12/grade")
        .insert_header(("authorization", "Bearer instructor-tok"))
        .set_json(serde_json::json!({"grade": 11}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("between 0 and 10"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/submissions/12/grade")
        .insert_header(("authorization", "Bearer instructor-tok"))
        .set_json(serde_json::json!({"grade": 9, "feedback": "Nearly perfect"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["grade"], 9);
    assert_eq!(body["data"]["graded_by"], "user-i");
}
