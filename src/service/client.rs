//! HTTP client for the blogging backstage
//!
//! Talks to the same endpoints the web backstage uses: the uniqueness check,
//! the form POST routes and the read-count ping.

use super::check::UniquenessQuery;
use super::traits::BackstageClientTrait;
use crate::state::FormSnapshot;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Default server address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client for communicating with the backstage server
pub struct BackstageClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackstageClient {
    /// Create a client; `timeout` bounds every request
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// The uniqueness endpoint answers with a bare JSON boolean
pub fn parse_unique_body(body: &Value) -> Result<bool> {
    body.as_bool()
        .ok_or_else(|| anyhow!("Unexpected uniqueness response: {body}"))
}

#[async_trait]
impl BackstageClientTrait for BackstageClient {
    async fn is_unique(&self, query: &UniquenessQuery) -> Result<bool> {
        let response = self
            .http
            .get(self.endpoint("/is-unique"))
            .query(&[(query.param(), query.value())])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach uniqueness endpoint: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("Uniqueness check rejected: {}", e))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to decode uniqueness response: {}", e))?;
        parse_unique_body(&body)
    }

    async fn submit_form(&self, path: &str, form: &FormSnapshot) -> Result<()> {
        let url = self.endpoint(path);
        tracing::debug!(%url, fields = form.len(), "submitting form");
        self.http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to submit form: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("Form was rejected: {}", e))?;
        Ok(())
    }

    async fn increment_read_count(&self, post_uid: &str) -> Result<()> {
        self.http
            .get(self.endpoint("/readcount-increment"))
            .query(&[("post_uid", post_uid)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joins_single_slash() {
        let client = BackstageClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.endpoint("/is-unique"),
            "http://localhost:5000/is-unique"
        );
        assert_eq!(
            client.endpoint("backstage/posts"),
            "http://localhost:5000/backstage/posts"
        );
    }

    #[test]
    fn test_parse_unique_body_accepts_booleans() {
        assert!(parse_unique_body(&json!(true)).unwrap());
        assert!(!parse_unique_body(&json!(false)).unwrap());
    }

    #[test]
    fn test_parse_unique_body_rejects_other_shapes() {
        assert!(parse_unique_body(&json!("true")).is_err());
        assert!(parse_unique_body(&json!({"unique": true})).is_err());
        assert!(parse_unique_body(&Value::Null).is_err());
    }
}
