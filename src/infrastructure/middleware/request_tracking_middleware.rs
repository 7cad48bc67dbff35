// Request tracking middleware - timing, access line and metrics for every route

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::USER_AGENT, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    infrastructure::{
        access_log::{AccessNote, AccessRecord, ACCESS_TARGET},
        monitoring::RequestLabels,
    },
};

/// Endpoint label for requests that matched no route
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Wraps every board route. Handlers describe their outcome with an
/// [`AccessNote`] response extension; requests without one are logged as
/// `<METHOD> <path>` in the `Request` category.
pub async fn request_tracking_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("request", %request_id, %method, %path);

    let mut response = next.run(request).instrument(span).await;
    let elapsed = start.elapsed();

    let note = response
        .extensions_mut()
        .remove::<AccessNote>()
        .unwrap_or_else(|| AccessNote::new(format!("{} {}", method, path), "Request"));

    let record = AccessRecord {
        source: &state.config.logging.source_tag,
        note: &note,
        elapsed,
        user_agent: &user_agent,
    };
    info!(target: ACCESS_TARGET, "{}", record.to_line());

    let labels = RequestLabels {
        method: method.to_string(),
        endpoint,
        http_status: response.status().as_u16(),
    };
    state.metrics.record_request(labels, elapsed).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
