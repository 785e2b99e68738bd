//! Per-request span, request id, completion log and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Scrape and liveness endpoints, polled too often to be worth a span each.
const UNOBSERVED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// How a finished request should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Ok
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let path = req.uri().path().to_owned();

    if UNOBSERVED_PATHS.contains(&path.as_str()) {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);
    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, &path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.route,
        path = %path,
        remote_addr = %req.remote_addr(),
        user = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    attach_parent(req, &span);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);
    let duration_ms = duration.as_millis();

    metrics::observe_request(
        &method,
        &names.route,
        status.as_u16(),
        duration.as_secs_f64(),
    );

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        match Outcome::of(status) {
            Outcome::ServerError => {
                error!(status = status.as_u16(), route = %names.route, "server error response");
            }
            Outcome::ClientError => {
                warn!(status = status.as_u16(), route = %names.route, "client error response");
            }
            Outcome::Ok => {}
        }

        let threshold_ms = u128::from(settings::slow_request_threshold_ms());

        if duration_ms > threshold_ms {
            warn!(route = %names.route, duration_ms, threshold_ms, "slow request detected");
        }
    });
}

fn attach_parent(req: &Request, span: &Span) {
    if !settings::otel_parent_propagation_enabled() {
        return;
    }

    if let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }
}
