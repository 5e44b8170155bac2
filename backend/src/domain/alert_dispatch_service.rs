//! Emergency alert dispatcher.
//!
//! The dispatcher authorises the caller, selects matching donors, sends the
//! same SMS body to each of them in turn, prunes numbers the gateway marks
//! as permanently invalid, and folds the outcomes into a summary.
//!
//! Sends are sequential and independent: a failure for one donor never
//! prevents attempts for the rest, and nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use super::donor_service::map_donor_repository_error;
use crate::domain::ports::{
    AlertDispatchCommand, AlertMetrics, DonorQuery, DonorRepository, NoOpAlertMetrics,
    SendAlertRequest, SendAlertResponse, SmsGateway,
};
use crate::domain::{
    AlertRequest, AlertSecret, AlertSummary, AreaFilter, BloodGroupFilter, DeliveryOutcome,
    DeliveryStatus, Donor, Error, invalid_destinations,
};

pub(crate) const UNAUTHORIZED_MESSAGE: &str = "Invalid password. You are not authorized to send alerts.";
const MISSING_FIELDS_MESSAGE: &str = "Hospital name, area, and blood group are required";
const INVALID_BLOOD_GROUP_MESSAGE: &str =
    "Blood group must be one of A+, A-, B+, B-, AB+, AB-, O+, O- or Any";

/// Alert dispatcher implementing [`AlertDispatchCommand`].
///
/// The shared secret is fixed at construction. With no secret configured
/// every dispatch is rejected as unauthorised.
pub struct AlertDispatchService<R: ?Sized, G: ?Sized, M: ?Sized = NoOpAlertMetrics> {
    donors: Arc<R>,
    gateway: Arc<G>,
    metrics: Arc<M>,
    secret: Option<AlertSecret>,
}

impl<R: ?Sized, G: ?Sized> AlertDispatchService<R, G, NoOpAlertMetrics> {
    /// Create a dispatcher that records no metrics.
    pub fn new(donors: Arc<R>, gateway: Arc<G>, secret: Option<AlertSecret>) -> Self {
        Self::with_metrics(donors, gateway, Arc::new(NoOpAlertMetrics), secret)
    }
}

impl<R: ?Sized, G: ?Sized, M: ?Sized> AlertDispatchService<R, G, M> {
    /// Create a dispatcher reporting delivery outcomes to `metrics`.
    pub fn with_metrics(
        donors: Arc<R>,
        gateway: Arc<G>,
        metrics: Arc<M>,
        secret: Option<AlertSecret>,
    ) -> Self {
        Self {
            donors,
            gateway,
            metrics,
            secret,
        }
    }

    fn authorise(&self, password: Option<&str>) -> Result<(), Error> {
        let authorised = match (&self.secret, password) {
            (Some(secret), Some(candidate)) if !candidate.is_empty() => secret.verify(candidate),
            _ => false,
        };
        if authorised {
            Ok(())
        } else {
            Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
        }
    }
}

fn missing_field(field: &str) -> Error {
    Error::invalid_request(MISSING_FIELDS_MESSAGE)
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn parse_alert(request: SendAlertRequest) -> Result<AlertRequest, Error> {
    let SendAlertRequest {
        hospital_name,
        area,
        blood_group,
        additional_info,
        ..
    } = request;

    for (field, value) in [
        ("hospitalName", &hospital_name),
        ("area", &area),
        ("bloodGroup", &blood_group),
    ] {
        if value.trim().is_empty() {
            return Err(missing_field(field));
        }
    }

    let area = AreaFilter::parse(&area).map_err(|_| missing_field("area"))?;
    let blood_group = BloodGroupFilter::parse(&blood_group).map_err(|err| {
        Error::invalid_request(INVALID_BLOOD_GROUP_MESSAGE).with_details(json!({
            "field": "bloodGroup",
            "code": "invalid_blood_group",
            "value": err.value,
        }))
    })?;

    Ok(AlertRequest {
        hospital_name,
        area,
        blood_group,
        additional_info,
    })
}

impl<R, G, M> AlertDispatchService<R, G, M>
where
    R: DonorRepository + ?Sized,
    G: SmsGateway + ?Sized,
    M: AlertMetrics + ?Sized,
{
    async fn deliver(&self, donor: &Donor, body: &str) -> DeliveryOutcome {
        let status = match self.gateway.send(&donor.phone, body).await {
            Ok(receipt) => {
                debug!(
                    phone = %donor.phone.masked(),
                    message_id = %receipt.message_id,
                    "alert delivered"
                );
                DeliveryStatus::Delivered
            }
            Err(error) if error.is_invalid_destination() => {
                warn!(phone = %donor.phone.masked(), %error, "alert destination invalid");
                DeliveryStatus::InvalidDestination
            }
            Err(error) => {
                warn!(phone = %donor.phone.masked(), %error, "alert delivery failed");
                DeliveryStatus::Failed
            }
        };

        if let Err(error) = self.metrics.record_delivery(status).await {
            debug!(%error, "failed to record alert delivery metric");
        }

        DeliveryOutcome {
            phone: donor.phone.clone(),
            status,
        }
    }

    /// Forget numbers the gateway rejected as invalid.
    ///
    /// Runs after every send has completed. Removal failures are logged and
    /// leave the summary unchanged.
    async fn prune(&self, outcomes: &[DeliveryOutcome]) {
        let mut pruned = 0_usize;
        for phone in invalid_destinations(outcomes) {
            match self.donors.delete(&phone).await {
                Ok(removed) => {
                    if removed {
                        pruned += 1;
                    }
                    info!(phone = %phone.masked(), removed, "pruned invalid donor number");
                }
                Err(error) => {
                    warn!(phone = %phone.masked(), %error, "failed to prune invalid donor number");
                }
            }
        }

        if pruned == 0 {
            return;
        }
        if let Err(error) = self.metrics.record_pruned(pruned).await {
            debug!(%error, "failed to record pruned donor metric");
        }
    }
}

#[async_trait]
impl<R, G, M> AlertDispatchCommand for AlertDispatchService<R, G, M>
where
    R: DonorRepository + ?Sized,
    G: SmsGateway + ?Sized,
    M: AlertMetrics + ?Sized,
{
    async fn dispatch(&self, request: SendAlertRequest) -> Result<SendAlertResponse, Error> {
        self.authorise(request.password.as_deref())?;
        let alert = parse_alert(request)?;

        let query = DonorQuery {
            area: alert.area.clone(),
            blood_group: alert.blood_group,
        };
        let recipients = self
            .donors
            .list(&query)
            .await
            .map_err(map_donor_repository_error)?;
        if recipients.is_empty() {
            return Err(Error::not_found(alert.no_donors_message()));
        }

        let body = alert.message();
        let mut outcomes = Vec::with_capacity(recipients.len());
        for donor in &recipients {
            outcomes.push(self.deliver(donor, &body).await);
        }

        self.prune(&outcomes).await;

        let summary = AlertSummary::from_outcomes(&outcomes);
        info!(
            hospital = %alert.hospital_name,
            area = alert.area.as_str(),
            blood_group = alert.blood_group.as_str(),
            recipients = summary.attempted(),
            successful = summary.successful_sends,
            failed = summary.failed_sends,
            "alert dispatched"
        );

        Ok(SendAlertResponse {
            message: summary.message(),
            successful_sends: summary.successful_sends,
            failed_sends: summary.failed_sends,
            failed_numbers: summary.failed_numbers,
        })
    }
}

#[cfg(test)]
#[path = "alert_dispatch_service_tests.rs"]
mod tests;
