//! API server entry point.

use std::process::ExitCode;

use api::config::{Config, LogFormat};
use restaurant_store::RestaurantCountLookup;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(error = %e, "SIGINT handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Resolves once SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use signal::unix::{SignalKind, signal};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(terminate) => terminate,
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for SIGINT");
                ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = ctrl_c() => tracing::info!(signal = "SIGINT", "starting graceful shutdown"),
            _ = terminate.recv() => tracing::info!(signal = "SIGTERM", "starting graceful shutdown"),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
        tracing::info!(signal = "ctrl-c", "starting graceful shutdown");
    }
}

fn init_tracing(config: &Config) {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn serve(config: &Config, lookup: RestaurantCountLookup) -> std::io::Result<()> {
    let app = api::create_app(api::create_state(lookup));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config);

    let store_config = match restaurant_store::Config::from_env() {
        Ok(store_config) => store_config,
        Err(e) => {
            tracing::error!(error = %e, "invalid backend configuration");
            return ExitCode::FAILURE;
        }
    };
    let lookup = RestaurantCountLookup::from_config(&store_config).await;

    if let Err(e) = serve(&config, lookup).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shut down gracefully");
    ExitCode::SUCCESS
}
