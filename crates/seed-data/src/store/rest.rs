//! Record store backed by the hosted database's PostgREST API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use hotel::Collection;

use super::{Filter, Query, Record, RecordStore, StoreError, column_from_message, project};

/// PostgREST reports a column missing from its schema cache with this code.
const SCHEMA_CACHE_COLUMN_MISSING: &str = "PGRST204";
/// SQLSTATE undefined_column, passed through when the database itself rejects the row.
const UNDEFINED_COLUMN: &str = "42703";

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Talks to `{base_url}/rest/v1/{collection}` with the project's API key.
pub struct RestRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestRecordStore {
    /// Creates a store for the given project URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Uses a preconfigured client (timeouts, proxies, TLS).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, collection: Collection) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            collection.as_str()
        )
    }

    fn request(&self, method: Method, collection: Collection) -> RequestBuilder {
        self.client
            .request(method, self.table_url(collection))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(collection: Collection, resp: Response) -> Result<Response, StoreError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(classify_error(collection, status, &body))
    }
}

fn filter_param(filter: &Filter) -> (&'static str, String) {
    match filter {
        Filter::IdGreaterThan(id) => ("id", format!("gt.{id}")),
    }
}

fn select_params(query: &Query) -> Vec<(&'static str, String)> {
    let columns = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query.columns.join(",")
    };
    let mut params = vec![("select", columns)];
    if query.order_by_id {
        params.push(("order", "id.asc".to_string()));
    }
    params
}

/// Maps a failed response onto the typed error model.
fn classify_error(collection: Collection, status: u16, body: &str) -> StoreError {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return StoreError::Rejected {
            collection,
            status,
            code: None,
            message: body.to_string(),
        };
    };

    let message = parsed.message.unwrap_or_else(|| body.to_string());
    let code = parsed.code;

    if matches!(code.as_deref(), Some(SCHEMA_CACHE_COLUMN_MISSING | UNDEFINED_COLUMN)) {
        if let Some(column) = column_from_message(&message) {
            return StoreError::UnknownColumn {
                collection,
                column: column.to_string(),
            };
        }
    }

    let message = match (parsed.details, parsed.hint) {
        (Some(details), _) if !details.is_empty() => format!("{message} ({details})"),
        (_, Some(hint)) if !hint.is_empty() => format!("{message} (hint: {hint})"),
        _ => message,
    };
    StoreError::Rejected {
        collection,
        status,
        code,
        message,
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), StoreError> {
        let resp = self
            .request(Method::DELETE, collection)
            .query(&[filter_param(filter)])
            .send()
            .await?;
        Self::check(collection, resp).await?;
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, StoreError> {
        debug!("POST {} rows to {}", records.len(), collection);
        let resp = self
            .request(Method::POST, collection)
            .header("Prefer", "return=representation")
            .json(&records)
            .send()
            .await?;
        let rows: Vec<Record> = Self::check(collection, resp).await?.json().await?;
        Ok(rows)
    }

    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Record>, StoreError> {
        let resp = self
            .request(Method::GET, collection)
            .query(&select_params(query))
            .send()
            .await?;
        let rows: Vec<Record> = Self::check(collection, resp).await?.json().await?;
        Ok(rows.iter().map(|row| project(row, &query.columns)).collect())
    }
}
