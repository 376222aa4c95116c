mod api;
mod middleware;

use igpick_core::{AppConfig, Environment};
use igpick_picker::{PickError, PickService};
use igpick_social::SocialApiClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = igpick_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = build_state(&config)?;
    let app = build_app(
        state,
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "igpick server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let picker = build_picker(config)?;
    Ok(AppState::new(picker, config.api_key_configured()))
}

/// Constructs the pick service.
///
/// In development a missing `RAPIDAPI_KEY` only disables picking; in every
/// other environment it fails startup.
fn build_picker(config: &AppConfig) -> anyhow::Result<Option<PickService<SocialApiClient>>> {
    match PickService::from_config(config) {
        Ok(picker) => Ok(Some(picker)),
        Err(PickError::Config(e)) if matches!(config.env, Environment::Development) => {
            tracing::warn!(error = %e, "RAPIDAPI_KEY not set; picks will fail until it is configured");
            Ok(None)
        }
        Err(PickError::Config(e)) => {
            anyhow::bail!("{e}; RAPIDAPI_KEY is required outside development")
        }
        Err(e) => Err(e.into()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
