//! API Middleware (Auth, Logging)

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::handlers::AppState;
use super::types::{ApiError, ApiResponse};
use crate::models::errors::AppError;

fn is_health_path(path: &str) -> bool {
    path == "/health" || path == "/v1/health"
}

/// API Key authentication middleware
///
/// Stands in for the dashboard login gate. When no key is configured every
/// request passes; otherwise non-health routes need a matching `X-API-Key`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    // Skip auth for health check
    if is_health_path(request.uri().path()) {
        return next.run(request).await;
    }

    let api_key = headers.get("X-API-Key").and_then(|v| v.to_str().ok());

    match api_key {
        Some(key) if key == expected => next.run(request).await,
        Some(_) => {
            warn!(uri = %request.uri(), "Invalid API key attempted");
            unauthorized(start)
        }
        None => {
            warn!(uri = %request.uri(), "Missing API key");
            unauthorized(start)
        }
    }
}

fn unauthorized(start: Instant) -> Response {
    let err = AppError::unauthorized();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error(ApiError::from(&err), latency_ms)),
    )
        .into_response()
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %latency.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_paths_skip_auth() {
        assert!(is_health_path("/health"));
        assert!(is_health_path("/v1/health"));
        assert!(!is_health_path("/v1/stats"));
    }
}
