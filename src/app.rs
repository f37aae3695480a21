use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::state::AppState;
use crate::ui::handlers;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .route("/api/years", get(handlers::years_handler))
        .route("/api/view", get(handlers::view_handler));

    if state.config.debug {
        router = router.route("/debug/dataset", get(handlers::debug_dataset_handler));
    }

    router.with_state(state)
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
pub async fn serve(state: AppState) -> Result<()> {
    let bind = state.config.bind_display();
    let listener = TcpListener::bind((state.config.host.as_str(), state.config.port))
        .await
        .with_context(|| format!("binding {bind}"))?;

    log::info!(
        "Dashboard for {} serving on http://{bind} (debug: {})",
        state.config.data_path.display(),
        state.config.debug
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server failed")?;

    log::info!("Shut down cleanly");
    Ok(())
}
