//! Server configuration from the environment.

use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_host: String,
    pub server_port: u16,
    /// API key for the identity provider.
    pub identity_api_key: String,
    /// Override for the identity provider base URL (emulators).
    pub identity_base_url: Option<String>,
    /// Base URL of the tree database.
    pub database_url: String,
    /// Optional database auth token for non-public databases.
    pub database_auth_token: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(ServerConfig {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            identity_api_key: env::var("IDENTITY_API_KEY")?,
            identity_base_url: env::var("IDENTITY_BASE_URL").ok(),
            database_url: env::var("DATABASE_URL")?,
            database_auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
        })
    }
}
