use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use tracing::debug;

use crate::db::Db;
use crate::error::AppError;
use crate::logging::pii::Redacted;

/// The authenticated caller, resolved by the hosted auth provider.
///
/// Extraction rejects anonymous clients with 401 before any network call;
/// for scoped clients the provider evaluates the bearer and returns the
/// identity it belongs to. Routes that allow anonymous access simply don't
/// take this extractor.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db = req.extensions().get::<Db>().cloned();

        Box::pin(async move {
            let db = db.ok_or_else(|| {
                AppError::internal("database client missing; auth middleware not installed")
            })?;

            if db.is_anonymous() {
                return Err(AppError::unauthorized());
            }

            let user = db.auth_user().await?;
            if let Some(email) = &user.email {
                debug!(user_id = %user.id, email = %Redacted(email), "resolved current user");
            }

            Ok(CurrentUser {
                id: user.id,
                email: user.email,
            })
        })
    }
}
