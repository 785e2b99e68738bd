//! Prometheus registry for HTTP traffic and checkout activity, served at `/metrics`.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const HTTP_REQUESTS_TOTAL: &str = "storefront_json_http_requests_total";
const HTTP_REQUEST_DURATION_SECONDS: &str = "storefront_json_http_request_duration_seconds";
const HTTP_REQUESTS_IN_FLIGHT: &str = "storefront_json_http_requests_in_flight";
const ORDERS_PLACED_TOTAL: &str = "storefront_json_orders_placed_total";
const ORDER_VALUE_TOTAL: &str = "storefront_json_order_value_total";
const ORDER_STATUS_CHANGES_TOTAL: &str = "storefront_json_order_status_changes_total";

/// Request latency buckets, from a cached catalog read to a slow checkout.
const DURATION_BUCKETS: [f64; 12] = [
    0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct StorefrontMetrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    http_in_flight: IntGauge,
    orders_placed: IntCounter,
    order_value: IntCounter,
    order_status_changes: IntCounterVec,
}

static METRICS: OnceLock<Option<StorefrontMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static StorefrontMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Decrements the in-flight gauge when the request finishes, including on panic unwind.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.http_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .http_requests
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .http_duration
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a completed checkout and add its total (minor currency units) to the order value.
pub(crate) fn record_order_placed(total_price: u64) {
    if let Some(metrics) = metrics() {
        metrics.orders_placed.inc();
        metrics.order_value.inc_by(total_price);
    }
}

pub(crate) fn record_order_status_change(status: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .order_status_changes
            .with_label_values(&[status])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut body = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&body).into_owned());
}

/// Create a collector and add it to `registry`, logging and giving up on failure.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!(metric = name, "failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!(metric = name, "failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<StorefrontMetrics> {
    let registry = Registry::new();

    let http_requests = register(
        &registry,
        HTTP_REQUESTS_TOTAL,
        IntCounterVec::new(
            Opts::new(HTTP_REQUESTS_TOTAL, "HTTP requests by method, route and status."),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let http_duration = register(
        &registry,
        HTTP_REQUEST_DURATION_SECONDS,
        HistogramVec::new(
            HistogramOpts::new(
                HTTP_REQUEST_DURATION_SECONDS,
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let http_in_flight = register(
        &registry,
        HTTP_REQUESTS_IN_FLIGHT,
        IntGauge::with_opts(Opts::new(
            HTTP_REQUESTS_IN_FLIGHT,
            "HTTP requests currently being served.",
        )),
    )?;

    let orders_placed = register(
        &registry,
        ORDERS_PLACED_TOTAL,
        IntCounter::with_opts(Opts::new(ORDERS_PLACED_TOTAL, "Checkouts that created an order.")),
    )?;

    let order_value = register(
        &registry,
        ORDER_VALUE_TOTAL,
        IntCounter::with_opts(Opts::new(
            ORDER_VALUE_TOTAL,
            "Sum of placed order totals in minor currency units.",
        )),
    )?;

    let order_status_changes = register(
        &registry,
        ORDER_STATUS_CHANGES_TOTAL,
        IntCounterVec::new(
            Opts::new(ORDER_STATUS_CHANGES_TOTAL, "Staff order status updates by new status."),
            &["status"],
        ),
    )?;

    Some(StorefrontMetrics {
        registry,
        http_requests,
        http_duration,
        http_in_flight,
        orders_placed,
        order_value,
        order_status_changes,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
