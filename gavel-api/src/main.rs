use std::net::SocketAddr;
use anyhow::Context;
use gavel_api::{app, AppState, AuthConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gavel_api=debug,gavel_core=info,gavel_store=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = gavel_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Gavel API on port {}", config.server.port);

    let stores = gavel_store::connect(&config).await.context("Failed to connect storage")?;

    let app_state = AppState::new(
        stores,
        AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            enable_token_helper: config.auth.enable_token_helper,
        },
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
