//! REST client for the hosted identity provider.
//!
//! Speaks the identity-toolkit account endpoints
//! (`accounts:signInWithPassword`, `accounts:signUp`, `accounts:delete`,
//! `accounts:lookup`), authenticated by an API key in the query string.
//! Provider error codes are mapped onto the core taxonomy; everything else
//! passes through verbatim.

use elaundry_core::ElaundryResult;
use elaundry_core::provider::{AuthenticatedUser, IdentityProvider};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// HTTP client for the identity provider.
#[derive(Debug, Clone)]
pub struct RestIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestIdentityProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the base URL (local emulator, or wiremock in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// POST one `accounts:{op}` call and return the decoded success body.
    async fn call(&self, op: &str, body: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/accounts:{op}?key={}", self.base_url, self.api_key);
        debug!(op, "Calling identity provider");

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if status.is_success() {
            Ok(payload)
        } else {
            Err(map_rejection(&payload, status.as_u16()))
        }
    }

    fn user_from(payload: &Value) -> Result<AuthenticatedUser, ProviderError> {
        let user_id = payload["localId"]
            .as_str()
            .ok_or_else(|| ProviderError::Decode("response carries no localId".into()))?;
        let id_token = payload["idToken"]
            .as_str()
            .ok_or_else(|| ProviderError::Decode("response carries no idToken".into()))?;
        Ok(AuthenticatedUser {
            user_id: user_id.to_string(),
            id_token: id_token.to_string(),
        })
    }
}

/// Map the provider's `{"error": {"message": CODE}}` body onto
/// [`ProviderError`]. Codes can carry a trailing explanation
/// (`"TOO_MANY_ATTEMPTS_TRY_LATER : ..."`), so match on the prefix.
fn map_rejection(payload: &Value, status: u16) -> ProviderError {
    let code = payload["error"]["message"].as_str().unwrap_or("");
    if code.starts_with("EMAIL_EXISTS") {
        ProviderError::EmailExists
    } else if code.starts_with("EMAIL_NOT_FOUND")
        || code.starts_with("INVALID_PASSWORD")
        || code.starts_with("INVALID_LOGIN_CREDENTIALS")
        || code.starts_with("USER_DISABLED")
    {
        ProviderError::BadCredentials
    } else if code.is_empty() {
        ProviderError::Rejected(format!("identity provider returned HTTP {status}"))
    } else {
        ProviderError::Rejected(code.to_string())
    }
}

impl IdentityProvider for RestIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> ElaundryResult<AuthenticatedUser> {
        let payload = self
            .call(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(Self::user_from(&payload)?)
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> ElaundryResult<AuthenticatedUser> {
        let payload = self
            .call(
                "signUp",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(Self::user_from(&payload)?)
    }

    async fn delete_account(&self, user_id: &str) -> ElaundryResult<()> {
        self.call("delete", json!({ "localId": user_id })).await?;
        Ok(())
    }

    async fn verify_token(&self, id_token: &str) -> ElaundryResult<String> {
        let payload = self.call("lookup", json!({ "idToken": id_token })).await?;
        let user_id = payload["users"][0]["localId"]
            .as_str()
            .ok_or_else(|| ProviderError::Decode("lookup response carries no user".into()))?;
        Ok(user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elaundry_core::ElaundryError;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> RestIdentityProvider {
        RestIdentityProvider::new("test-key").with_base_url(format!("{}/v1", server.uri()))
    }

    #[tokio::test]
    async fn authenticate_returns_the_provider_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "email": "a@b.com",
                "password": "pw"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localId": "u1",
                "idToken": "tok-1"
            })))
            .mount(&server)
            .await;

        let user = provider(&server).authenticate("a@b.com", "pw").await.unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.id_token, "tok-1");
    }

    #[tokio::test]
    async fn wrong_password_maps_to_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "INVALID_PASSWORD" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .authenticate("a@b.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, ElaundryError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_email_already_in_use() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "EMAIL_EXISTS" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .create_account("a@b.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, ElaundryError::EmailAlreadyInUse));
    }

    #[tokio::test]
    async fn unknown_error_codes_pass_through_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "OPERATION_NOT_ALLOWED" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .create_account("a@b.com", "pw")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OPERATION_NOT_ALLOWED"));
    }

    #[tokio::test]
    async fn verify_token_resolves_the_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .and(body_partial_json(serde_json::json!({ "idToken": "tok-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [{ "localId": "u1" }]
            })))
            .mount(&server)
            .await;

        let user_id = provider(&server).verify_token("tok-1").await.unwrap();
        assert_eq!(user_id, "u1");
    }
}
