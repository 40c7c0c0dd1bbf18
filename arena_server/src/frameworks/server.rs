// Framework bootstrap for the arena server runtime.

use crate::frameworks::config;
use crate::interface_adapters::http::static_files;
use crate::interface_adapters::net::{spawn_world_serializer, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{ArenaHandle, ArenaSettings};

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::path::Path;
use std::{
    io::{Error, ErrorKind, Result},
    sync::Arc,
};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serves the arena on an already-bound listener using settings from the environment.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    run_with_settings(listener, config::arena_settings(), &config::static_root()).await
}

pub async fn run_with_settings(
    listener: tokio::net::TcpListener,
    settings: ArenaSettings,
    static_root: &Path,
) -> Result<()> {
    let address = listener.local_addr()?;

    // Bad tuning would break the tick; refuse to start instead.
    settings.tuning.validate().map_err(|reason| {
        tracing::error!(%reason, "invalid arena tuning");
        Error::new(ErrorKind::InvalidInput, reason)
    })?;

    let state = build_state(&settings);
    let app = app(state, static_root);

    tracing::info!(
        %address,
        tick_ms = settings.tick_interval.as_millis() as u64,
        static_root = %static_root.display(),
        "listening"
    );

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::new(config::bind_addr(), config::http_port());

    // Bind TCP listener; failure here aborts startup.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn app(state: Arc<AppState>, static_root: &Path) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .fallback_service(static_files(static_root))
        .with_state(state)
}

fn build_state(settings: &ArenaSettings) -> Arc<AppState> {
    // Spawn the authoritative world loop and its snapshot serializer.
    let arena = ArenaHandle::spawn(settings);
    spawn_world_serializer(&arena);

    tracing::debug!(tuning = ?settings.tuning, rng_seed = ?settings.rng_seed, "arena configured");

    Arc::new(AppState { arena })
}
