//! HTTP server for the card and topic API plus static files

mod dispatch;
pub mod response;
mod route;
mod static_files;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::db::Database;
use crate::error::Result;
use crate::table::Registry;

pub use dispatch::dispatch;

/// Value of the `Server` header on every response
pub const SERVER_NAME: &str = concat!("nerd/", env!("CARGO_PKG_VERSION"));

/// Process-lifetime state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub doc_root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(registry: Registry, doc_root: impl Into<PathBuf>) -> Self {
        Self {
            registry: Arc::new(registry),
            doc_root: Arc::new(doc_root.into()),
        }
    }
}

/// Build the router: one fallback handler does all routing
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(middleware::map_response(set_server_header))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn set_server_header(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
    response
}

/// Open the database and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let db = Database::open(Path::new(&config.database), config.busy_timeout())?;
    let registry = Registry::with_defaults(Arc::new(db));

    if !Path::new(&config.doc_root).is_dir() {
        tracing::warn!(doc_root = %config.doc_root, "document root is not a directory");
    }
    let state = AppState::new(registry, &config.doc_root);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        doc_root = %config.doc_root,
        database = %config.database,
        resources = ?state.registry.names(),
        "nerd listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
