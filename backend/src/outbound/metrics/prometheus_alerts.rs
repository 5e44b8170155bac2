//! Prometheus adapter for alert dispatch metrics.
//!
//! Metrics are registered with a provided registry and exposed via the
//! `/metrics` endpoint.

use async_trait::async_trait;
use prometheus::{CounterVec, IntCounter, Opts, Registry};

use crate::domain::DeliveryStatus;
use crate::domain::ports::{AlertMetrics, AlertMetricsError};

/// Prometheus-backed alert metrics recorder.
///
/// # Metric Specification
///
/// - `bloodlink_alert_deliveries_total` (counter), labelled by `status`:
///   `delivered`, `invalid_destination` or `failed`.
/// - `bloodlink_pruned_donors_total` (counter): donors removed after the
///   gateway reported their number as invalid.
pub struct PrometheusAlertMetrics {
    deliveries_total: CounterVec,
    pruned_total: IntCounter,
}

impl PrometheusAlertMetrics {
    /// Create and register metrics with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if either metric cannot be registered, for example
    /// when the registry already holds a metric with the same name.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let deliveries_total = CounterVec::new(
            Opts::new(
                "bloodlink_alert_deliveries_total",
                "Alert SMS send attempts by outcome",
            ),
            &["status"],
        )?;
        let pruned_total = IntCounter::with_opts(Opts::new(
            "bloodlink_pruned_donors_total",
            "Donors removed after invalid-number failures",
        ))?;
        registry.register(Box::new(deliveries_total.clone()))?;
        registry.register(Box::new(pruned_total.clone()))?;
        Ok(Self {
            deliveries_total,
            pruned_total,
        })
    }
}

#[async_trait]
impl AlertMetrics for PrometheusAlertMetrics {
    async fn record_delivery(&self, status: DeliveryStatus) -> Result<(), AlertMetricsError> {
        self.deliveries_total
            .with_label_values(&[status.as_str()])
            .inc();
        Ok(())
    }

    async fn record_pruned(&self, count: usize) -> Result<(), AlertMetricsError> {
        let count = u64::try_from(count).map_err(|err| AlertMetricsError::export(err.to_string()))?;
        self.pruned_total.inc_by(count);
        Ok(())
    }
}
