//! Domain port surface for recording alert delivery metrics.
//!
//! The dispatcher reports each send outcome and the number of pruned donors
//! without knowing which metrics backend, if any, is installed.

use async_trait::async_trait;

use crate::domain::DeliveryStatus;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording alert metrics.
    pub enum AlertMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "alert metrics exporter failed: {message}",
    }
}

/// Metrics recording port for alert dispatch.
#[async_trait]
pub trait AlertMetrics: Send + Sync {
    /// Record the outcome of one send attempt.
    async fn record_delivery(&self, status: DeliveryStatus) -> Result<(), AlertMetricsError>;

    /// Record donors removed after invalid-number failures.
    async fn record_pruned(&self, count: usize) -> Result<(), AlertMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAlertMetrics;

#[async_trait]
impl AlertMetrics for NoOpAlertMetrics {
    async fn record_delivery(&self, _status: DeliveryStatus) -> Result<(), AlertMetricsError> {
        Ok(())
    }

    async fn record_pruned(&self, _count: usize) -> Result<(), AlertMetricsError> {
        Ok(())
    }
}
