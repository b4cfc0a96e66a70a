//! HTTP surface: routes, views, and the server loop.

pub mod error;
pub mod routes;
pub mod view;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::Result;
use routes::*;

/// Build the application router around a shared catalog.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/delete/:author/:title", get(delete_handler))
        .route("/edit/:author/:rating/:title", get(edit_select_handler))
        .route("/add", get(add_form_handler))
        .route(
            "/add/from_entry",
            post(add_submit_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/edit/from_entry",
            post(edit_commit_handler).fallback(method_not_allowed_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

/// Serve on an already-bound listener until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, catalog: Arc<Catalog>) -> Result<()> {
    let address = listener.local_addr()?;
    info!("Server running on {address}");

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
