//! Low-level request plumbing for the hosted backend.
//!
//! The backend speaks a PostgREST-style dialect: per-table endpoints under
//! `/rest/v1/`, equality filters and ordering as query parameters, range
//! pagination through `Range` headers with `Prefer: count=exact`, and
//! `Prefer: return=representation` to get the persisted row back from
//! inserts and updates. Identity-provider endpoints live under `/auth/v1/`.

use crate::config::AppConfig;
use crate::errors::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Handle on the hosted backend.
///
/// Constructed exactly once at startup from the resolved configuration and
/// injected into every consumer; cloning shares the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct Rest {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl Rest {
    /// Builds the backend handle, rejecting missing configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        if config.backend_url.is_empty() || config.api_key.is_empty() {
            return Err(Error::Config(
                "Backend URL and anon key must be set (BACKUP_CONSOLE_URL / \
                 BACKUP_CONSOLE_ANON_KEY or config.toml) before using the gateway"
                    .to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub(crate) fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .prepare(self.http.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;
        let response = check(response).await?;
        let rows: Vec<T> = response.json().await?;
        debug!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    /// Range-paginated select returning the slice plus the exact total count.
    pub(crate) async fn select_page<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        from: usize,
        to: usize,
    ) -> Result<(Vec<T>, u64)> {
        let response = self
            .prepare(self.http.get(self.table_url(table)))
            .query(query)
            .header("Range-Unit", "items")
            .header("Range", format!("{from}-{to}"))
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;

        let content_range = response
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let total = content_range_total(content_range.as_deref())?;
        let rows: Vec<T> = response.json().await?;
        debug!("Fetched page {from}-{to} of {table}: {} rows of {total}", rows.len());
        Ok((rows, total))
    }

    /// Inserts one row and returns it as persisted by the backend.
    pub(crate) async fn insert<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T> {
        let response = self
            .prepare(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        let rows: Vec<T> = check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Backend(format!("insert into {table} returned no row")))
    }

    /// Updates the row with the given id and returns it as persisted.
    pub(crate) async fn update<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        entity: &'static str,
        id: i64,
        payload: &P,
    ) -> Result<T> {
        let response = self
            .prepare(self.http.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        let rows: Vec<T> = check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or(Error::NotFoundForUpdate(entity))
    }

    pub(crate) async fn delete(&self, table: &str, id: i64) -> Result<()> {
        let response = self
            .prepare(self.http.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Maps a non-success response to [`Error::Backend`] carrying the backend's
/// own message when one is present in the body.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Backend(backend_message(status, &body)))
}

pub(crate) fn backend_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("msg"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("backend returned status {status}"))
}

/// Parses the total row count out of a `Content-Range` header (`0-9/57`).
pub(crate) fn content_range_total(header: Option<&str>) -> Result<u64> {
    header
        .and_then(|value| value.rsplit('/').next())
        .and_then(|total| total.parse().ok())
        .ok_or_else(|| Error::Backend("missing or invalid Content-Range header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::path::PathBuf;

    fn config(url: &str, key: &str) -> AppConfig {
        AppConfig {
            backend_url: url.to_string(),
            api_key: key.to_string(),
            session_file: PathBuf::from("data/session.json"),
        }
    }

    #[test]
    fn test_new_rejects_missing_configuration() {
        assert!(matches!(
            Rest::new(&config("", "")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Rest::new(&config("https://example.supabase.co", "")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Rest::new(&config("", "anon-key")),
            Err(Error::Config(_))
        ));
        assert!(Rest::new(&config("https://example.supabase.co", "anon-key")).is_ok());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let rest = Rest::new(&config("https://example.supabase.co/", "k")).unwrap();
        assert_eq!(rest.table_url("clientes"), "https://example.supabase.co/rest/v1/clientes");
        assert_eq!(rest.auth_url("user"), "https://example.supabase.co/auth/v1/user");
    }

    #[test]
    fn test_content_range_total() {
        assert_eq!(content_range_total(Some("0-9/57")).unwrap(), 57);
        assert_eq!(content_range_total(Some("*/0")).unwrap(), 0);
        assert!(content_range_total(Some("0-9/*")).is_err());
        assert!(content_range_total(None).is_err());
    }

    #[test]
    fn test_backend_message_prefers_body_message() {
        assert_eq!(
            backend_message(409, r#"{"message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(
            backend_message(400, r#"{"msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(backend_message(500, "not json"), "backend returned status 500");
        assert_eq!(backend_message(502, ""), "backend returned status 502");
    }
}
