//! Builders for HTTP state ports backed by the database and SMS gateway.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use bloodlink::domain::ports::{
    AlertDispatchCommand, BloodBankCatalogue, DonorDirectory, DonorRegistrationCommand,
    FixtureSmsGateway, SmsGateway, StoreHealth,
};
use bloodlink::domain::{
    AlertDispatchService, AlertSecret, BloodBankService, DonorDirectoryService,
    DonorRegistrationService,
};
use bloodlink::inbound::http::state::HttpState;
use bloodlink::outbound::persistence::{
    DbPool, DieselBloodBankRepository, DieselDonorRepository, DieselStoreHealth,
};

use super::ServerConfig;

/// Repository-backed ports sharing one donor repository.
struct DonorPorts {
    alerts: Arc<dyn AlertDispatchCommand>,
    registration: Arc<dyn DonorRegistrationCommand>,
    directory: Arc<dyn DonorDirectory>,
}

#[cfg(feature = "metrics")]
fn build_alert_service(
    donors: Arc<DieselDonorRepository>,
    gateway: Arc<dyn SmsGateway>,
    secret: Option<AlertSecret>,
    config: &ServerConfig,
) -> std::io::Result<Arc<dyn AlertDispatchCommand>> {
    use bloodlink::outbound::metrics::PrometheusAlertMetrics;

    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusAlertMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("alert metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(AlertDispatchService::with_metrics(
                donors,
                gateway,
                Arc::new(metrics),
                secret,
            )))
        }
        None => Ok(Arc::new(AlertDispatchService::new(donors, gateway, secret))),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_alert_service(
    donors: Arc<DieselDonorRepository>,
    gateway: Arc<dyn SmsGateway>,
    secret: Option<AlertSecret>,
    _config: &ServerConfig,
) -> std::io::Result<Arc<dyn AlertDispatchCommand>> {
    Ok(Arc::new(AlertDispatchService::new(donors, gateway, secret)))
}

fn build_donor_ports(config: &ServerConfig, pool: &DbPool) -> std::io::Result<DonorPorts> {
    let donors = Arc::new(DieselDonorRepository::new(pool.clone()));
    let gateway = config
        .sms_gateway
        .clone()
        .unwrap_or_else(|| Arc::new(FixtureSmsGateway) as Arc<dyn SmsGateway>);
    let alerts = build_alert_service(donors.clone(), gateway, config.alert_secret.clone(), config)?;

    Ok(DonorPorts {
        alerts,
        registration: Arc::new(DonorRegistrationService::new(
            donors.clone(),
            Arc::new(DefaultClock),
        )),
        directory: Arc::new(DonorDirectoryService::new(donors)),
    })
}

fn build_blood_bank_catalogue(pool: &DbPool) -> Arc<dyn BloodBankCatalogue> {
    Arc::new(BloodBankService::new(Arc::new(
        DieselBloodBankRepository::new(pool.clone()),
    )))
}

fn build_store_health(pool: &DbPool) -> Arc<dyn StoreHealth> {
    Arc::new(DieselStoreHealth::new(pool.clone()))
}

/// Build the shared HTTP state from configured adapters and fixture fallbacks.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let Some(pool) = &config.db_pool else {
        return Ok(web::Data::new(HttpState::fixtures()));
    };

    let DonorPorts {
        alerts,
        registration,
        directory,
    } = build_donor_ports(config, pool)?;

    Ok(web::Data::new(HttpState {
        alerts,
        registration,
        directory,
        blood_banks: build_blood_bank_catalogue(pool),
        store_health: build_store_health(pool),
    }))
}
