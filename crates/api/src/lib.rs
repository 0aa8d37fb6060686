pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use handlers::*;
pub use middleware::*;
pub use routes::*;
pub use state::*;

use account_models::AccountError;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn start_server(state: AppState) -> Result<(), AccountError> {
    let addr = state.config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AccountError::InternalError {
            reason: format!("failed to bind {addr}: {e}"),
        })?;
    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), AccountError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    if let Ok(addr) = listener.local_addr() {
        info!("Account API server listening on {}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AccountError::InternalError {
            reason: e.to_string(),
        })
}

/// Resolves on Ctrl-C, or SIGTERM on unix (what container runtimes send on stop).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("Unable to listen for SIGTERM: {}", err);
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

    info!("Received shutdown signal");
}
