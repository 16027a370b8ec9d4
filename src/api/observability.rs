use crate::api::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

use axum::{
    extract::{MatchedPath, Request},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Part of the app a route belongs to, used as a low-cardinality metric label.
fn surface(route: Option<&str>) -> &'static str {
    match route {
        None => "unmatched",
        Some(r) if r.starts_with("/api/") => "api",
        Some(r) if r.starts_with("/img") => "image",
        Some("/metrics") => "metrics",
        Some("/login" | "/logout") => "auth",
        Some(_) => "page",
    }
}

/// True for the gate's bounce of an anonymous request to the login page.
fn is_login_redirect(response: &Response) -> bool {
    response.status() == StatusCode::SEE_OTHER
        && response
            .headers()
            .get(header::LOCATION)
            .is_some_and(|v| v.as_bytes() == b"/login")
}

/// Request span plus catalog request metrics. The session gate fills in the
/// span's `usuario` field once it has resolved the logged-in user.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let surface = surface(route.as_deref());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = route.as_deref().unwrap_or("unmatched"),
        surface,
        usuario = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method),
            ("route", route.unwrap_or_else(|| "unmatched".to_string())),
            ("surface", surface.to_string()),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("filmoteca_http_requests_total", &labels).increment(1);
        metrics::histogram!("filmoteca_http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        if is_login_redirect(&response) {
            metrics::counter!("filmoteca_login_redirects_total").increment(1);
        }
        if surface == "image" && status == StatusCode::NOT_FOUND {
            metrics::counter!("filmoteca_image_relay_misses_total").increment(1);
        }

        info!(
            status = status.as_u16(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}
