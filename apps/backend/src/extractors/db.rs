use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::db::Db;
use crate::error::AppError;

/// The scoped database client is inserted by the auth-resolution
/// middleware; its absence means the chain was assembled without it.
impl FromRequest for Db {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<Db>().cloned().ok_or_else(|| {
            AppError::internal("database client missing; auth middleware not installed")
        }))
    }
}
