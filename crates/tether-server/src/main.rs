mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use tether_api::AppStateInner;
use tether_chat::{HttpChatBackend, TokenIssuer};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tether=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init user directory
    let db = tether_db::Database::open(&PathBuf::from(&config.db_path))?;

    // Chat backend client: constructed once here, injected everywhere.
    let tokens = TokenIssuer::new(config.chat_api_key.as_str(), config.chat_api_secret.as_str());
    let chat = HttpChatBackend::new(config.chat_base_url.as_str(), &tokens, config.chat_timeout)?;

    let state = Arc::new(AppStateInner {
        db,
        chat,
        tokens,
        jwt_secret: config.jwt_secret.clone(),
    });

    let app = tether_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Tether server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
