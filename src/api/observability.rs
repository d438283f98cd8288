use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, field, info, info_span, warn};
use uuid::Uuid;

const MOVIE_ROUTE: &str = "/filme/{id}";

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                "Metrics not enabled or failed to initialize".to_string(),
            )
        },
        |handle| (StatusCode::OK, handle.render()),
    )
}

/// Wraps a routed request in a span and records it in the request metrics.
///
/// Requests on a single movie carry its id on the span, so every event the
/// service logs while handling them can be filtered by movie.
pub async fn track_request(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());
    let movie_id = movie_id(&route, req.uri().path());

    let span = info_span!(
        "http",
        request_id = %Uuid::new_v4(),
        %method,
        %route,
        movie_id,
        status = field::Empty,
    );

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let elapsed = started.elapsed();
    span.record("status", status.as_u16());

    let labels = [
        ("method", method.to_string()),
        ("route", route),
        ("status", status.as_u16().to_string()),
    ];
    metrics::counter!("filmes_http_requests_total", &labels).increment(1);
    metrics::histogram!("filmes_http_request_duration_seconds", &labels)
        .record(elapsed.as_secs_f64());

    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    span.in_scope(|| {
        if status.is_server_error() {
            warn!(elapsed_ms, "Request failed");
        } else {
            info!(elapsed_ms, "Request handled");
        }
    });

    response
}

/// Movie id addressed by a request, if it targets a single movie.
fn movie_id(route: &str, path: &str) -> Option<i32> {
    if route != MOVIE_ROUTE {
        return None;
    }
    path.rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_only_for_single_movie_route() {
        assert_eq!(movie_id(MOVIE_ROUTE, "/filme/42"), Some(42));
        assert_eq!(movie_id(MOVIE_ROUTE, "/filme/abc"), None);
        assert_eq!(movie_id("/filme", "/filme"), None);
        assert_eq!(movie_id("/health", "/health"), None);
    }
}
