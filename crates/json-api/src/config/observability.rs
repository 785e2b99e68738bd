//! Tracing export and request-timing settings.

use clap::Args;

/// OpenTelemetry export and slow-request settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export traces over OTLP.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces from an incoming `traceparent` header. Needs `OTEL_ENABLED`.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP export timeout in seconds.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "storefront-json")]
    pub otel_service_name: String,

    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Share of root traces kept; values outside [0.0, 1.0] are clamped.
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged at `warn`.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Sampling ratio clamped to the unit interval.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }

    /// Parent extraction needs the W3C propagator, which is only installed when exporting.
    #[must_use]
    pub fn parent_propagation_enabled(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}
