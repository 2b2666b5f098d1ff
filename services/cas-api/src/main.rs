//! mockcas CAS API
//!
//! Serves the login and validate endpoints of a mock CAS server.
//!
//! ```text
//! cas-api [--address ADDR] [--port PORT] <SECRET> <DATA_DIR>
//! ```

use cas_api::{build_router, AppState, Config};
use clap::Parser;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("cas_api=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting mockcas CAS API");

    // Load configuration
    let config = Config::parse();
    config.validate()?;
    tracing::info!(
        addr = %config.listen_addr(),
        data_dir = %config.data_dir.display(),
        cache_capacity = config.cache_capacity,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("HTTP server listening on {}", config.listen_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
