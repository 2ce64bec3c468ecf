//! Car Doctor Server - Main Application Entry Point
//!
//! A REST API over a catalogue of car services and customer orders. Reading
//! orders requires a credential cookie issued by `POST /jwt`.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, documents stored as JSONB
//! - **Authentication**: HS256 JWT in an HTTP-only cookie
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Connect the document store (pool, migrations, ping)
//! 3. Build HTTP router with routes and middleware
//! 4. Serve until Ctrl+C / SIGTERM
//! 5. Close the store

use car_doctor_server::{
    config, db,
    routes::{build_router, cors_layer},
    services::auth_service::AuthService,
    state::AppState,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // One store for the whole process, shared by every request
    let store = db::connect_store(&config).await?;

    let state = AppState::new(store.clone(), AuthService::from_config(&config)?);
    let app = build_router(state, cors_layer(&config.client_origin)?);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Close even if serving failed
    store.close().await;
    tracing::info!("Storage connection closed");

    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
