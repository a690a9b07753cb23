use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::client::Db;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Ordering direction for `Query::order`.
#[derive(Debug, Clone, Copy)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    const fn suffix(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

enum Action {
    Select,
    Insert(serde_json::Value),
    Update(serde_json::Value),
    Delete,
}

/// Builder for one request against a table of the hosted service.
///
/// Mirrors the service's REST dialect: column filters become
/// `column=eq.value` query parameters, mutations ask for the affected rows
/// back (`Prefer: return=representation`) so callers can distinguish
/// "nothing matched" from success.
pub struct Query {
    db: Db,
    table: String,
    action: Action,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
    single: bool,
}

impl Query {
    pub(crate) fn new(db: Db, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            action: Action::Select,
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    /// Columns (or embedded resources) to return.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Equality filter on a column.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `IS NULL` / `IS NOT NULL` filter.
    pub fn is_null(mut self, column: &str, null: bool) -> Self {
        let op = if null { "is.null" } else { "not.is.null" };
        self.filters.push((column.to_string(), op.to_string()));
        self
    }

    /// Membership filter: `column=in.(a,b,c)`.
    pub fn in_list<T: ToString>(mut self, column: &str, values: &[T]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_string(), format!("in.({list})")));
        self
    }

    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.order = Some(format!("{column}.{}", direction.suffix()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Insert a row; the created row is returned.
    pub fn insert(mut self, row: &impl Serialize) -> Self {
        self.action = Action::Insert(serde_json::json!(row));
        self
    }

    /// Update rows matching the filters; affected rows are returned.
    pub fn update(mut self, patch: &impl Serialize) -> Self {
        self.action = Action::Update(serde_json::json!(patch));
        self
    }

    /// Delete rows matching the filters; affected rows are returned.
    pub fn delete(mut self) -> Self {
        self.action = Action::Delete;
        self
    }

    /// Assemble the outbound request. Split from dispatch so construction
    /// is testable without a server.
    pub(crate) fn prepare(&self) -> reqwest::RequestBuilder {
        let method = match self.action {
            Action::Select => Method::GET,
            Action::Insert(_) => Method::POST,
            Action::Update(_) => Method::PATCH,
            Action::Delete => Method::DELETE,
        };

        let path = format!("rest/v1/{}", self.table);
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let mut builder = self.db.request(method, &path).query(&params);

        match &self.action {
            Action::Select => {}
            Action::Insert(body) | Action::Update(body) => {
                builder = builder
                    .header("Prefer", "return=representation")
                    .json(body);
            }
            Action::Delete => {
                builder = builder.header("Prefer", "return=representation");
            }
        }

        if self.single {
            builder = builder.header("Accept", "application/vnd.pgrst.object+json");
        }

        builder
    }

    /// Fetch all matching rows.
    pub async fn fetch_all<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        let response = self.send().await?;
        decode(response).await
    }

    /// Fetch at most one row; `Ok(None)` when nothing matched.
    pub async fn fetch_optional<T: DeserializeOwned>(mut self) -> Result<Option<T>, AppError> {
        self.single = true;
        let response = self.send().await?;
        // Zero rows in single-object mode come back as 406 from the service.
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// Fetch exactly one row; zero rows is an upstream contract violation
    /// surfaced as `DB_ERROR`. Use `fetch_optional` where absence is a
    /// legitimate outcome.
    pub async fn fetch_one<T: DeserializeOwned>(mut self) -> Result<T, AppError> {
        self.single = true;
        let response = self.send().await?;
        decode(response).await
    }

    async fn send(&self) -> Result<reqwest::Response, AppError> {
        let response = self
            .prepare()
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("database request failed: {e}")))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_ACCEPTABLE {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &body))
    }
}

/// Map an upstream non-success status onto the error registry.
fn map_error_status(status: StatusCode, body: &str) -> AppError {
    let snippet: String = body.chars().take(200).collect();
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(),
        StatusCode::FORBIDDEN => AppError::forbidden("Access denied by row policy"),
        StatusCode::NOT_FOUND => {
            AppError::not_found(ErrorCode::NotFound, "Resource not found upstream")
        }
        StatusCode::CONFLICT => AppError::conflict(ErrorCode::Conflict, snippet),
        _ => AppError::db(format!("upstream answered {status}: {snippet}")),
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::internal(format!("database response decode failed: {e}")))
}
