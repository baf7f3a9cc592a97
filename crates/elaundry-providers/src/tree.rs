//! REST client for the hosted JSON tree database.
//!
//! Every node is addressable as `{base}/{path}.json`; GET reads a subtree
//! (JSON `null` means absent), PUT replaces it, PATCH merges fields, DELETE
//! removes it. An optional legacy `auth` query token is supported for
//! databases that are not world-writable.

use elaundry_core::ElaundryResult;
use elaundry_core::provider::TreeDatabase;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ProviderError;

/// HTTP client for the tree database.
#[derive(Debug, Clone)]
pub struct RestTreeDatabase {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestTreeDatabase {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Attach a database auth token, sent as the `auth` query parameter.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn node_url(&self, path: &str) -> String {
        let mut url = format!("{}/{}.json", self.base_url, path.trim_matches('/'));
        if let Some(token) = &self.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::Rejected(format!(
                "tree database returned HTTP {status}: {body}"
            )))
        }
    }
}

impl TreeDatabase for RestTreeDatabase {
    async fn get(&self, path: &str) -> ElaundryResult<Option<Value>> {
        debug!(path, "Tree read");
        let response = self
            .client
            .get(self.node_url(path))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let value: Value = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn set(&self, path: &str, value: &Value) -> ElaundryResult<()> {
        debug!(path, "Tree write");
        let response = self
            .client
            .put(self.node_url(path))
            .json(value)
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: &Map<String, Value>) -> ElaundryResult<()> {
        debug!(path, "Tree partial update");
        let response = self
            .client
            .patch(self.node_url(path))
            .json(fields)
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> ElaundryResult<()> {
        debug!(path, "Tree delete");
        let response = self
            .client
            .delete(self.node_url(path))
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check(response).await?;
        Ok(())
    }
}
