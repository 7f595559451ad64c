//! HTTP client for the remote progress service.
//!
//! Base URL and API key come from [`PlannerConfig`](crate::config::PlannerConfig).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::*;

use super::RemoteProgress;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: API key required or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct RemoteProgressClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl RemoteProgressClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with optional auth header.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::BadRequest(body))
                }
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    /// Store progress for a checklist, replacing any earlier record.
    pub async fn upsert(
        &self,
        checklist_id: &str,
        input: &UpsertProgressInput,
    ) -> Result<ChecklistProgress, ClientError> {
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/progress/{}", encode_segment(checklist_id)),
            )
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch the most recent progress record. A missing record is `Ok(None)`.
    pub async fn fetch(&self, query: &ProgressQuery) -> Result<Option<ChecklistProgress>, ClientError> {
        let mut params: Vec<(&str, &str)> = vec![];
        if let Some(ref email) = query.email {
            params.push(("email", email.as_str()));
        }
        if let Some(ref user_id) = query.user_id {
            params.push(("user_id", user_id.as_str()));
        }

        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/progress/{}", encode_segment(&query.checklist_id)),
            )
            .query(&params)
            .send()
            .await?;

        match self.handle_response(response).await {
            Ok(progress) => Ok(Some(progress)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RemoteProgress for RemoteProgressClient {
    async fn upsert_progress(
        &self,
        checklist_id: &str,
        input: &UpsertProgressInput,
    ) -> Result<(), ClientError> {
        self.upsert(checklist_id, input).await.map(|_| ())
    }

    async fn fetch_progress(
        &self,
        query: &ProgressQuery,
    ) -> Result<Option<ChecklistProgress>, ClientError> {
        self.fetch(query).await
    }
}

/// Percent-encode a path segment.
fn encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters_in_ids() {
        assert_eq!(encode_segment("plan-42_a.b~c"), "plan-42_a.b~c");
        assert_eq!(encode_segment("a/b c?"), "a%2Fb%20c%3F");
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let client = RemoteProgressClient::new("http://example.test/api/v1/", None);
        assert_eq!(client.base_url(), "http://example.test/api/v1");
    }
}
