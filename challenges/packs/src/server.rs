use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use log::{debug, error, info};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::error::AppError;
use crate::solver::PackSizes;

#[derive(Debug, Deserialize)]
struct CalculateParams {
    items: Option<String>,
}

/// Builds the router. The pack sizes are shared read-only by every request.
pub fn app(sizes: Arc<PackSizes>) -> Router {
    Router::new()
        .route("/calculate-packs", get(calculate_packs))
        .route("/health", get(health))
        .with_state(sizes)
}

async fn calculate_packs(
    State(sizes): State<Arc<PackSizes>>,
    params: Result<Query<CalculateParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|err| {
        debug!("rejected query: {}", err);
        AppError::BadRequest("malformed query string")
    })?;
    let raw = params
        .items
        .ok_or(AppError::BadRequest("items must be provided"))?;
    let target: u64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("items must be a non-negative integer"))?;

    let selection = sizes.solve(target);
    debug!("items={} packs={:?}", target, selection);

    let body = serde_json::to_vec(&selection).inspect_err(|err| {
        error!("failed to convert packs to JSON: {}", err);
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the pack calculator on `listener` until `shutdown` completes.
pub async fn run(
    listener: TcpListener,
    sizes: PackSizes,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("serving pack sizes {:?} on {}", sizes.as_slice(), addr);
    }
    serve(listener, app(Arc::new(sizes)), shutdown).await
}

/// Serves `router` until `shutdown` completes, then waits for in-flight
/// requests to finish before returning.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutting down");
        })
        .await
}
