//! Error-envelope test helpers for backend testing
//!
//! Asserts the stable failure contract, `{"error":{"code","message"}}`
//! with a non-2xx status, without depending on backend types.

use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body so this crate stays decoupled
/// from backend types.
#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    error: ErrorDetailLike,
}

#[derive(Debug, Deserialize)]
struct ErrorDetailLike {
    code: String,
    message: String,
}

/// Assert that response parts conform to the stable error contract:
/// - HTTP status matches expected
/// - body is `{"error":{"code","message"}}`
/// - code matches, and the message contains the given substring if any
pub fn assert_error_body_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_message_contains: Option<&str>,
) {
    assert_eq!(status, expected_status);
    assert!(
        !expected_status.is_success(),
        "error contract assertions require a non-2xx expected status"
    );

    let body_str =
        String::from_utf8(body_bytes.to_vec()).expect("Response body should be valid UTF-8");
    let body: ErrorBodyLike =
        serde_json::from_str(&body_str).expect("Response body should be valid error-envelope JSON");

    assert_eq!(body.error.code, expected_code);

    if let Some(expected_message) = expected_message_contains {
        assert!(
            body.error.message.contains(expected_message),
            "Expected message to contain '{}', but got '{}'",
            expected_message,
            body.error.message
        );
    }
}

/// Assert that a ServiceResponse conforms to the stable error contract.
pub async fn assert_error_body_from_service_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_message_contains: Option<&str>,
) {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(
        status,
        &body,
        expected_code,
        expected_status,
        expected_message_contains,
    );
}
