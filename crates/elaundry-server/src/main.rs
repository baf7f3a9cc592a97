//! E-Laundry Server — application entry point.

use std::net::{IpAddr, SocketAddr};

use elaundry_providers::{RestIdentityProvider, RestTreeDatabase};
use elaundry_server::{AppState, ServerConfig, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let config = ServerConfig::from_env().expect("Failed to load configuration");

    let mut identity = RestIdentityProvider::new(config.identity_api_key.clone());
    if let Some(base_url) = &config.identity_base_url {
        identity = identity.with_base_url(base_url.clone());
    }

    let mut db = RestTreeDatabase::new(config.database_url.clone());
    if let Some(token) = &config.database_auth_token {
        db = db.with_auth_token(token.clone());
    }

    let app = router(AppState { identity, db });

    // Permissive CORS is a development convenience only.
    #[cfg(debug_assertions)]
    let app = app.layer(tower_http::cors::CorsLayer::permissive());

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid SERVER_HOST, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Deletion endpoint listening on {addr}");

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
