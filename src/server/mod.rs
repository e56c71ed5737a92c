//! HTTP surface over the catalog.

pub mod error;
pub mod handlers;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::{Catalog, ConfigProvider};
use crate::server::error::ApiError;
use crate::utils::error::Result;

/// State shared by every handler. The catalog is never mutated after load.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache_max_age: u64,
    pub public_base_url: Option<String>,
    /// Used for sitemap URLs when a request carries no Host header.
    pub fallback_host: String,
}

impl AppState {
    pub fn new<C: ConfigProvider + ?Sized>(catalog: Arc<Catalog>, config: &C) -> Self {
        Self {
            catalog,
            cache_max_age: config.cache_max_age(),
            public_base_url: config
                .public_base_url()
                .map(|url| url.trim_end_matches('/').to_string()),
            fallback_host: config.bind_addr(),
        }
    }
}

/// Builds the router with every API route mounted under `api_prefix`.
pub fn router(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .route("/tools", get(handlers::list_tools))
        .route("/tools/slug/:slug", get(handlers::tool_by_slug))
        .route("/tools/:id", get(handlers::tool_by_id))
        .route("/categories", get(handlers::list_categories))
        .route("/health", get(handlers::health))
        .route("/sitemap.xml", get(handlers::sitemap_xml))
        .with_state(Arc::new(state));

    let app = if api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    app.fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub fn build_app<C: ConfigProvider + ?Sized>(catalog: Arc<Catalog>, config: &C) -> Router {
    router(AppState::new(catalog, config), config.api_prefix())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// A server running on a background task; stops when dropped.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn spawn(addr: &str, app: Router) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = serve(listener, app, shutdown).await {
                tracing::error!("❌ Server stopped: {}", e);
            }
        });

        tracing::info!("Listening on http://{}", addr);
        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}
