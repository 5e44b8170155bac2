//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of domain metrics ports, feature-gated
//! behind the `metrics` feature.

mod prometheus_alerts;

pub use prometheus_alerts::PrometheusAlertMetrics;
