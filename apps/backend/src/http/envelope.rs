//! Success envelope shared by every route: `{"ok":true,"data":<payload>}`.
//!
//! Failures never pass through here; they are rendered by `AppError`'s
//! `ResponseError` impl as `{"error":{"code","message"}}`.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    fn wrap(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// 200 with the payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::wrap(data))
}

/// 201 with the created row in the success envelope.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope::wrap(data))
}

/// 200 with a null payload, for operations with nothing to return.
pub fn ok_empty() -> HttpResponse {
    ok(serde_json::Value::Null)
}
