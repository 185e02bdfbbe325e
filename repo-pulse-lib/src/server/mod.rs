//! HTTP surface
//!
//! [`StatsService`] ties a [`StatsCache`] to an [`Assemble`] implementation and turns
//! each read into a [`StatsResponse`]. [`router`] exposes it over axum as
//! `GET /api/stats`, alongside a `GET /health` probe.

mod response;

pub use response::{CacheHeaders, ResponseBody, StatsResponse, respond};

use crate::Result;
use crate::cache::StatsCache;
use crate::collector::Assemble;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use std::sync::Arc;
use tokio::net::TcpListener;

const LOG_TARGET: &str = "   server";

/// Path the stats payload is served from.
pub const STATS_PATH: &str = "/api/stats";

/// Answers stats requests from the cache, assembling on demand.
#[derive(Debug)]
pub struct StatsService<A> {
    assembler: A,
    cache: StatsCache,
    headers: CacheHeaders,
}

impl<A: Assemble> StatsService<A> {
    #[must_use]
    pub const fn new(assembler: A, cache: StatsCache, headers: CacheHeaders) -> Self {
        Self { assembler, cache, headers }
    }

    #[must_use]
    pub const fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Handle one stats request arriving at `now`.
    pub async fn handle(&self, now: DateTime<Utc>) -> StatsResponse {
        let result = self.cache.get(&self.assembler, now).await;
        let response = respond(result, &self.headers);
        log::debug!(target: LOG_TARGET, "{STATS_PATH} -> {}", response.status);
        response
    }
}

/// Build the axum router for `service`.
pub fn router<A: Assemble + 'static>(service: Arc<StatsService<A>>) -> Router {
    Router::new()
        .route(STATS_PATH, get(stats_handler::<A>))
        .route("/health", get(health_handler))
        .with_state(service)
}

/// Serve `service` on `listener` until Ctrl-C.
pub async fn serve<A: Assemble + 'static>(listener: TcpListener, service: Arc<StatsService<A>>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!(target: LOG_TARGET, "Serving statistics on http://{addr}{STATS_PATH}");
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_app_err("running HTTP server")
}

async fn stats_handler<A: Assemble + 'static>(State(service): State<Arc<StatsService<A>>>) -> StatsResponse {
    service.handle(Utc::now()).await
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!(target: LOG_TARGET, "Could not listen for shutdown signal: {e:#}");
        return;
    }
    log::info!(target: LOG_TARGET, "Shutting down");
}
