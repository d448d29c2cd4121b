use std::path::Path;
use std::sync::{Arc, RwLock};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::routing::{any, get};
use axum::Router;
use tower_http::services::ServeDir;

use crate::aggregate::SalesAggregator;
use crate::config::AppConfig;
use crate::reference::ReferenceStore;

pub mod api;
pub mod routes;

/// Shared by every request: the reference tables and the current record set.
pub struct AppState {
    pub reference: Arc<ReferenceStore>,
    pub aggregator: RwLock<SalesAggregator>,
}

impl AppState {
    pub fn new(reference: ReferenceStore) -> Self {
        Self {
            reference: Arc::new(reference),
            aggregator: RwLock::new(SalesAggregator::new()),
        }
    }
}

pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(dispatch))
        .route("/api/*rest", any(dispatch))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> routes::HttpResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let body = String::from_utf8_lossy(&body);
    let response = routes::route_request(&state, method.as_str(), &path, &body);
    tracing::debug!(
        method = %method,
        path = %path,
        status = response.status_code,
        "request handled"
    );
    response
}

pub fn run_server(config: &AppConfig) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(config))
}

async fn serve(config: &AppConfig) -> std::io::Result<()> {
    let reference = ReferenceStore::load(&config.city_regions, &config.region_warehouses).await;
    let state = Arc::new(AppState::new(reference));
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "sales-pivot server listening");
    axum::serve(listener, app).await
}
