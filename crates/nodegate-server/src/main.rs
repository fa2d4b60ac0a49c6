//! nodegate server
//!
//! - `POST /`: admission decision for one node key
//! - Allow-list re-read lazily, at most once per refresh interval
//! - Ops endpoints: /healthz, /readyz, /status, /metrics
//!
//! Usage: `nodegate-server [config.yaml]` (falls back to `$NODEGATE_CONFIG`,
//! then `nodegate.yaml`).

use tracing_subscriber::{fmt, EnvFilter};

use nodegate_core::error::{Result, NodeGateError};
use nodegate_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "nodegate-server exiting");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = config::resolve_path(std::env::args().nth(1));
    let cfg = config::load_from_file(&path)?;

    let state = AppState::new(cfg)?;
    if state.cfg().allowlist.warm_on_start {
        state.cache().refresh_if_stale().await;
    }

    let listen = state.cfg().server.listen.clone();
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| NodeGateError::Internal(format!("bind {listen} failed: {e}")))?;

    tracing::info!(
        %listen,
        config = %path,
        allowlist = %state.cfg().allowlist.path,
        refresh_interval_ms = state.cfg().allowlist.refresh_interval_ms,
        "serving"
    );

    let app = router::build_router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| NodeGateError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    state.set_draining();
    tracing::info!("shutdown requested; draining");
}
