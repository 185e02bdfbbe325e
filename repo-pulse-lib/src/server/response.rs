use crate::Result;
use crate::cache::CacheOutcome;
use crate::shaping::AggregatedPayload;
use axum::Json;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use core::time::Duration;
use serde::Serialize;
use std::sync::Arc;

/// `Cache-Control` windows advertised to downstream caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheHeaders {
    /// How long a fresh or cached payload may be reused.
    pub max_age: Duration,

    /// How much longer a shared cache may serve it while revalidating.
    pub stale_while_revalidate: Duration,

    /// How long a stale payload may be reused; kept short so intermediaries retry soon.
    pub stale_max_age: Duration,
}

impl CacheHeaders {
    #[must_use]
    pub fn fresh_directive(&self) -> String {
        format!(
            "max-age={}, stale-while-revalidate={}",
            self.max_age.as_secs(),
            self.stale_while_revalidate.as_secs()
        )
    }

    #[must_use]
    pub fn stale_directive(&self) -> String {
        format!("max-age={}", self.stale_max_age.as_secs())
    }
}

impl Default for CacheHeaders {
    fn default() -> Self {
        Self {
            max_age: Duration::from_mins(5),
            stale_while_revalidate: Duration::from_mins(10),
            stale_max_age: Duration::from_mins(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Payload(Arc<AggregatedPayload>),
    Error { error: String },
}

/// The response to a stats request, independent of any HTTP framework.
#[derive(Debug, Clone)]
pub struct StatsResponse {
    pub status: StatusCode,
    pub cache_control: Option<String>,
    pub body: ResponseBody,
}

/// Map the result of a cache read to a response.
#[must_use]
pub fn respond(result: Result<CacheOutcome>, headers: &CacheHeaders) -> StatsResponse {
    match result {
        Ok(CacheOutcome::Fresh(payload) | CacheOutcome::Cached(payload)) => StatsResponse {
            status: StatusCode::OK,
            cache_control: Some(headers.fresh_directive()),
            body: ResponseBody::Payload(payload),
        },
        Ok(CacheOutcome::Stale(payload)) => StatsResponse {
            status: StatusCode::OK,
            cache_control: Some(headers.stale_directive()),
            body: ResponseBody::Payload(payload),
        },
        Err(e) => StatsResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            cache_control: None,
            body: ResponseBody::Error { error: client_message(&e) },
        },
    }
}

/// Render an error for HTTP clients: the message and its context chain, without
/// source locations or a backtrace.
fn client_message(e: &ohno::AppError) -> String {
    let rendered = e.to_string();
    let rendered = rendered.split("\nBacktrace:").next().unwrap_or(&rendered);

    rendered
        .lines()
        .map(|line| match line.rfind(" (at ") {
            Some(at) if line.ends_with(')') => line.get(..at).unwrap_or(line),
            _ => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        let cache_control = self.cache_control.and_then(|cc| HeaderValue::from_str(&cc).ok());

        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(value) = cache_control {
            let _ = response.headers_mut().insert(CACHE_CONTROL, value);
        }

        response
    }
}
