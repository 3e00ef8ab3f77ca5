use crate::config::JsonServiceConfig;
use crate::handlers;
use crate::services::DocumentStore;
use axum::{
    handler::Handler,
    http::{Method, StatusCode},
    middleware::from_fn,
    response::Response,
    routing::{get, MethodRouter},
    Router,
};
use service_core::error::{error_response, AppError};
use service_core::middleware::{http_trace_layer, metrics_middleware, request_id_middleware};
use std::any::Any;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};

pub const ENDPOINTS: [(&str, &str); 3] = [
    ("/api/random", "Get a random JSON file"),
    ("/api/files", "List all available JSON files"),
    ("/api/file/:filename", "Get a specific JSON file"),
];

#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: JsonServiceConfig) -> Result<Self, AppError> {
        let store = DocumentStore::new(&config.store.directory);
        store.ensure_ready().await.map_err(|e| {
            tracing::error!(
                "Failed to create document directory {}: {}",
                config.store.directory.display(),
                e
            );
            e
        })?;

        let router = build_router(AppState { store });

        let addr = config.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            directory = %config.store.directory.display(),
            "Listening on http://{}",
            local_addr
        );
        for (path, description) in ENDPOINTS {
            tracing::info!(path, "{}", description);
        }

        Ok(Self {
            port: local_addr.port(),
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get_only(handlers::health_check))
        .route("/metrics", get_only(handlers::metrics_endpoint))
        .route("/api/random", get_only(handlers::random_document))
        .route("/api/files", get_only(handlers::list_documents))
        .route("/api/file/:filename", get_only(handlers::get_document))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(cors::Any),
        )
}

/// GET route whose other methods answer with a JSON 405 instead of an empty body.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(handlers::method_not_allowed)
}

/// Turns a handler panic into the generic 500 body; the payload only reaches the log.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
