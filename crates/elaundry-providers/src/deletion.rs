//! HTTP client for the privileged deletion endpoint.

use elaundry_core::provider::DeletionEndpoint;
use elaundry_core::{ElaundryError, ElaundryResult};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct DeletionResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for `POST /delete-user`, authenticated with the caller's
/// provider-issued id token.
#[derive(Debug, Clone)]
pub struct HttpDeletionEndpoint {
    client: reqwest::Client,
    base_url: String,
    id_token: String,
}

impl HttpDeletionEndpoint {
    pub fn new(base_url: impl Into<String>, id_token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            id_token: id_token.into(),
        }
    }
}

impl DeletionEndpoint for HttpDeletionEndpoint {
    async fn delete_user(&self, user_id: &str, shop_id: &str) -> ElaundryResult<String> {
        debug!(user_id, shop_id, "Requesting privileged deletion");
        let response = self
            .client
            .post(format!("{}/delete-user", self.base_url))
            .bearer_auth(&self.id_token)
            .json(&json!({ "userId": user_id, "shopId": shop_id }))
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        let body: DeletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if status.is_success() {
            Ok(body
                .message
                .unwrap_or_else(|| "User and associated data deleted successfully.".into()))
        } else {
            // The backend's reported error message is surfaced verbatim.
            Err(ElaundryError::Provider(body.error.unwrap_or_else(|| {
                format!("deletion endpoint returned HTTP {status}")
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn success_returns_the_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/delete-user"))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_json(serde_json::json!({ "userId": "u1", "shopId": "s1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "User and associated data deleted successfully."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = HttpDeletionEndpoint::new(server.uri(), "tok-1");
        let message = endpoint.delete_user("u1", "s1").await.unwrap();
        assert_eq!(message, "User and associated data deleted successfully.");
    }

    #[tokio::test]
    async fn failure_surfaces_the_backend_error_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/delete-user"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "no identity account for u1"
            })))
            .mount(&server)
            .await;

        let endpoint = HttpDeletionEndpoint::new(server.uri(), "tok-1");
        let err = endpoint.delete_user("u1", "s1").await.unwrap_err();
        assert!(matches!(err, ElaundryError::Provider(ref m) if m == "no identity account for u1"));
    }
}
