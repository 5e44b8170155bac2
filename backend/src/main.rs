//! Backend entry-point: loads settings, prepares the database and gateway,
//! seeds the blood-bank directory, then serves the REST API.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
#[cfg(feature = "metrics")]
use color_eyre::eyre::eyre;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloodlink::domain::BloodBankService;
use bloodlink::inbound::http::health::HealthState;
use bloodlink::outbound::persistence::{
    DbPool, DieselBloodBankRepository, PoolConfig, run_pending_migrations,
};
use bloodlink::outbound::sms::TwilioSmsGateway;
use bloodlink::seeding::{BloodBankSeedSettings, SeedOutcome, seed_blood_banks_on_startup};
use bloodlink::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env(&DefaultEnv::new()).wrap_err("invalid settings")?;

    run_pending_migrations(&settings.database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(settings.database_url.as_str()))
        .await
        .wrap_err("failed to build database pool")?;

    seed_blood_banks(&pool).await;

    let gateway = TwilioSmsGateway::new(
        &settings.twilio_api_base,
        settings.twilio.clone(),
        settings.sms_timeout,
    )
    .wrap_err("failed to build SMS gateway client")?;

    let config = ServerConfig::new(settings.bind_addr)
        .with_db_pool(pool)
        .with_sms_gateway(Arc::new(gateway))
        .with_alert_secret(settings.alert_secret.clone());
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr, "bloodlink listening");
    server.await?;
    Ok(())
}

/// Seed the blood-bank directory. Failures are logged and never fatal.
async fn seed_blood_banks(pool: &DbPool) {
    let seed_settings =
        match BloodBankSeedSettings::load_from_iter([OsString::from("bloodlink")]) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(error = %error, "blood bank seed settings invalid; skipping seed");
                return;
            }
        };
    let service = BloodBankService::new(Arc::new(DieselBloodBankRepository::new(pool.clone())));
    match seed_blood_banks_on_startup(&seed_settings, &service).await {
        Ok(SeedOutcome::Seeded { count }) => info!(count, "blood bank directory seeded"),
        Ok(outcome) => info!(?outcome, "blood bank seeding not applied"),
        Err(error) => warn!(error = %error, "blood bank seeding failed"),
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("bloodlink")
        .endpoint("/metrics")
        .build()
        .map_err(|e| eyre!("failed to configure Prometheus metrics: {e}"))
}
