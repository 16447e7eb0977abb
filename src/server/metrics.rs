use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::extractor::TargetFormat;

/// Metric name prefix for all MusicFinder metrics
const PREFIX: &str = "musicfinder";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Search Metrics
    pub static ref SEARCHES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_searches_total"), "Total search requests"),
        &["status"]
    ).expect("Failed to create searches_total metric");

    // Download Metrics
    pub static ref DOWNLOADS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_downloads_total"), "Total download requests"),
        &["format", "status"]
    ).expect("Failed to create downloads_total metric");

    pub static ref DOWNLOAD_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_download_duration_seconds"),
            "Download and transcode duration in seconds"
        )
        .buckets(vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["format"]
    ).expect("Failed to create download_duration_seconds metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(SEARCHES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(DOWNLOADS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(DOWNLOAD_DURATION_SECONDS.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a search request outcome
pub fn record_search(success: bool) {
    let status = if success { "ok" } else { "error" };
    SEARCHES_TOTAL.with_label_values(&[status]).inc();
}

/// Record a download request outcome
pub fn record_download(format: TargetFormat, success: bool, duration: Duration) {
    let status = if success { "ok" } else { "error" };
    DOWNLOADS_TOTAL
        .with_label_values(&[format.extension(), status])
        .inc();

    DOWNLOAD_DURATION_SECONDS
        .with_label_values(&[format.extension()])
        .observe(duration.as_secs_f64());
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
