use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;

use crate::config::db::DbConfig;
use crate::db::query::Query;
use crate::error::AppError;

/// Identity resolved by the hosted auth provider for a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// A database client scoped to one request's resolved credential.
///
/// The underlying `reqwest::Client` is the process-wide transport; the
/// `Db` value itself is built fresh for every request and never shared
/// across requests. An anonymous client sends no `Authorization` header,
/// so downstream row policies evaluate it as the anonymous role.
#[derive(Debug, Clone)]
pub struct Db {
    http: Client,
    base_url: String,
    anon_key: String,
    bearer: Option<String>,
}

impl Db {
    pub fn new(http: Client, config: &DbConfig, bearer: Option<String>) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            bearer,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.bearer.is_none()
    }

    /// The resolved bearer token, if any. Exposed for auth gating and tests;
    /// never log this value raw.
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// Start a query against a table of the service's REST interface.
    pub fn from(&self, table: &str) -> Query {
        Query::new(self.clone(), table)
    }

    /// Build an outbound request with the client's identity headers applied.
    ///
    /// `apikey` always carries the anon key; `Authorization: Bearer` is
    /// injected iff a credential was resolved for this request.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let mut builder = self.http.request(method, url).header("apikey", &self.anon_key);
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Resolve the current identity from the provider's auth endpoint.
    ///
    /// Anonymous clients short-circuit to 401 without a network call.
    pub async fn auth_user(&self) -> Result<AuthUser, AppError> {
        if self.is_anonymous() {
            return Err(AppError::unauthorized());
        }

        let response = self
            .request(Method::GET, "auth/v1/user")
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("auth request failed: {e}")))?;

        match response.status() {
            StatusCode::OK => response
                .json::<AuthUser>()
                .await
                .map_err(|e| AppError::internal(format!("auth response decode failed: {e}"))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::unauthorized()),
            status => Err(AppError::db(format!(
                "auth endpoint answered with status {status}"
            ))),
        }
    }
}
