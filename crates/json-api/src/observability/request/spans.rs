//! HTTP span helpers.

use uuid::Uuid;

/// Route label and span name for a request, with identifiers collapsed.
#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_for_path(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace identifier segments so metrics and span names stay low-cardinality.
fn route_for_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_owned();
    }

    let mut route = String::new();

    for segment in segments {
        route.push('/');

        if Uuid::parse_str(segment).is_ok() {
            route.push_str("{uuid}");
        } else {
            route.push_str(segment);
        }
    }

    route
}
