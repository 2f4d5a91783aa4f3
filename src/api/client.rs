//! HTTP client for the table-query and RPC surface.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::filter::{filters_to_pairs, Filter, SelectQuery};
use super::{AffectedRows, ApiError, DeleteMockOrdersParams, IncrementClicksParams};

/// Thin wrapper over the hosted data API.
///
/// Cheap to clone; the underlying HTTP client is reference counted.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Build a client for the given API base URL and service key.
    ///
    /// No request timeout is configured beyond the HTTP client's defaults;
    /// failure handling is single-attempt throughout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.api_key).header("apikey", &self.api_key)
    }

    /// Map a non-success response to the error taxonomy.
    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(match code {
            401 | 403 => ApiError::Auth(format!("{} ({})", what, code)),
            404 => ApiError::NotFound(what.to_string()),
            _ => ApiError::Status { status: code, body },
        })
    }

    /// Run a select and decode the row list.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &SelectQuery) -> Result<Vec<T>, ApiError> {
        let resp = self
            .authed(self.http.get(self.table_url(table)))
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = Self::check(resp, table).await?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| ApiError::InvalidData(e.to_string()))
    }

    /// Run a select expected to match at most one row.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Option<T>, ApiError> {
        let limited = query.clone().limit(1);
        let mut rows = self.select::<T>(table, &limited).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    /// Insert one row and return the stored representation.
    pub async fn insert_one<T: Serialize, R: DeserializeOwned>(&self, table: &str, row: &T) -> Result<R, ApiError> {
        let resp = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = Self::check(resp, table).await?;
        let mut rows: Vec<R> = resp.json().await.map_err(|e| ApiError::InvalidData(e.to_string()))?;
        if rows.is_empty() {
            return Err(ApiError::InvalidData(format!("insert into {} returned no rows", table)));
        }
        Ok(rows.remove(0))
    }

    /// Insert a batch of rows without asking for the representation back.
    pub async fn insert_many<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), ApiError> {
        let resp = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(resp, table).await?;
        Ok(())
    }

    /// Patch the rows matching `filters`.
    pub async fn update<T: Serialize>(&self, table: &str, filters: &[Filter], patch: &T) -> Result<(), ApiError> {
        let resp = self
            .authed(self.http.patch(self.table_url(table)))
            .query(&filters_to_pairs(filters))
            .json(patch)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(resp, table).await?;
        Ok(())
    }

    /// Delete the rows matching `filters`.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), ApiError> {
        let resp = self
            .authed(self.http.delete(self.table_url(table)))
            .query(&filters_to_pairs(filters))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(resp, table).await?;
        Ok(())
    }

    /// Call a named RPC function with JSON parameters.
    pub async fn rpc<P: Serialize, R: DeserializeOwned>(&self, function: &str, params: &P) -> Result<R, ApiError> {
        let resp = self
            .authed(self.http.post(self.rpc_url(function)))
            .json(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = Self::check(resp, function).await?;
        resp.json::<R>().await.map_err(|e| ApiError::InvalidData(e.to_string()))
    }

    /// Bump the click counter for an event's public link.
    pub async fn increment_event_clicks(&self, event_id: Uuid) -> Result<i64, ApiError> {
        let count: i64 = self.rpc("increment_event_clicks", &IncrementClicksParams { event_id }).await?;
        Ok(count)
    }

    /// Bulk-delete the mock orders generated against an event.
    pub async fn delete_mock_orders(&self, event_id: Uuid) -> Result<i64, ApiError> {
        let affected: AffectedRows = self.rpc("delete_mock_orders", &DeleteMockOrdersParams { event_id }).await?;
        Ok(affected.0)
    }
}
