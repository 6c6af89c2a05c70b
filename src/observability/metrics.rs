//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devhost_requests_total` (counter): requests by route label and status
//! - `devhost_request_duration_seconds` (histogram): handling time by route label
//! - `devhost_proxy_requests_total` (counter): relays by backend and outcome
//! - `devhost_proxy_duration_seconds` (histogram): relay latency by backend
//!
//! Recording is a no-op until a recorder is installed, so handlers call these
//! unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// One handled request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "devhost_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("devhost_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// One relay attempt; `outcome` is `success` or a failure kind.
pub fn record_relay(backend: &str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "devhost_proxy_requests_total",
        "backend" => backend.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("devhost_proxy_duration_seconds", "backend" => backend.to_string())
        .record(start.elapsed().as_secs_f64());
}
