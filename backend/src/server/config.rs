//! Listener address and the optional adapters handed to `create_server`.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use bloodlink::domain::AlertSecret;
use bloodlink::domain::ports::SmsGateway;
use bloodlink::outbound::persistence::DbPool;

/// What `create_server` binds to and which adapters back the ports.
///
/// Anything left unset is served by fixtures.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) sms_gateway: Option<Arc<dyn SmsGateway>>,
    pub(crate) alert_secret: Option<AlertSecret>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Fixture-backed configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            sms_gateway: None,
            alert_secret: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back donors and blood banks with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the outbound SMS gateway used by the alert dispatcher.
    #[must_use]
    pub fn with_sms_gateway(mut self, gateway: Arc<dyn SmsGateway>) -> Self {
        self.sms_gateway = Some(gateway);
        self
    }

    /// Set the hospital alert password. `None` rejects every alert.
    #[must_use]
    pub fn with_alert_secret(mut self, secret: Option<AlertSecret>) -> Self {
        self.alert_secret = secret;
        self
    }

    /// Request and alert metrics registry; `None` disables both.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
