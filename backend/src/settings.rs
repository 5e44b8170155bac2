//! Process settings read from the environment.
//!
//! Everything the server needs before it can accept traffic is parsed and
//! validated here, so a misconfigured deployment fails at startup rather than
//! on the first alert.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::AlertSecret;
use crate::outbound::sms::TwilioCredentials;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const TWILIO_ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
const TWILIO_AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
const TWILIO_PHONE_NUMBER_ENV: &str = "TWILIO_PHONE_NUMBER";
const TWILIO_API_BASE_ENV: &str = "TWILIO_API_BASE";
const SMS_TIMEOUT_ENV: &str = "SMS_GATEWAY_TIMEOUT_SECS";
const ALERT_PASSWORD_ENV: &str = "HOSPITAL_ALERT_PASSWORD";
const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";

const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_SMS_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated process settings.
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Zeroizing<String>,
    /// Gateway account credentials and sender number.
    pub twilio: TwilioCredentials,
    /// Scheme and host of the gateway REST API.
    pub twilio_api_base: Url,
    /// Request timeout for each outbound SMS.
    pub sms_timeout: Duration,
    /// Hospital alert password; `None` rejects every alert.
    pub alert_secret: Option<AlertSecret>,
    /// Listener address.
    pub bind_addr: SocketAddr,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &"<redacted>")
            .field("twilio", &self.twilio)
            .field("twilio_api_base", &self.twilio_api_base.as_str())
            .field("sms_timeout", &self.sms_timeout)
            .field("alert_secret", &self.alert_secret)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl AppSettings {
    /// Read and validate settings from `env`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bloodlink::settings::AppSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATABASE_URL" => Some("postgres://localhost/bloodlink".to_owned()),
    ///     "TWILIO_ACCOUNT_SID" => Some("AC123".to_owned()),
    ///     "TWILIO_AUTH_TOKEN" => Some("token".to_owned()),
    ///     "TWILIO_PHONE_NUMBER" => Some("+15005550006".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.bind_addr.port(), 3000);
    /// assert!(settings.alert_secret.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let database_url = Zeroizing::new(required(env, DATABASE_URL_ENV)?);
        let twilio = TwilioCredentials {
            account_sid: required(env, TWILIO_ACCOUNT_SID_ENV)?,
            auth_token: Zeroizing::new(required(env, TWILIO_AUTH_TOKEN_ENV)?),
            from: required(env, TWILIO_PHONE_NUMBER_ENV)?,
        };
        let twilio_api_base = twilio_api_base(env)?;
        let sms_timeout = sms_timeout(env)?;
        let alert_secret = alert_secret(env);
        let bind_addr = SocketAddr::new(bind_host(env)?, port(env)?);

        Ok(Self {
            database_url,
            twilio,
            twilio_api_base,
            sms_timeout,
            alert_secret,
            bind_addr,
        })
    }
}

fn optional<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, SettingsError> {
    optional(env, name).ok_or(SettingsError::MissingEnv { name })
}

fn twilio_api_base<E: Env>(env: &E) -> Result<Url, SettingsError> {
    let value =
        optional(env, TWILIO_API_BASE_ENV).unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.to_owned());
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(SettingsError::InvalidEnv {
            name: TWILIO_API_BASE_ENV,
            value,
            expected: "an http(s) URL",
        }),
    }
}

fn sms_timeout<E: Env>(env: &E) -> Result<Duration, SettingsError> {
    let Some(value) = optional(env, SMS_TIMEOUT_ENV) else {
        return Ok(Duration::from_secs(DEFAULT_SMS_TIMEOUT_SECS));
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SettingsError::InvalidEnv {
            name: SMS_TIMEOUT_ENV,
            value,
            expected: "a positive number of seconds",
        }),
    }
}

fn alert_secret<E: Env>(env: &E) -> Option<AlertSecret> {
    let secret = env
        .string(ALERT_PASSWORD_ENV)
        .map(Zeroizing::new)
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| AlertSecret::new(&raw));
    if secret.is_none() {
        warn!("HOSPITAL_ALERT_PASSWORD not set; every alert will be rejected");
    }
    secret
}

fn port<E: Env>(env: &E) -> Result<u16, SettingsError> {
    let Some(value) = optional(env, PORT_ENV) else {
        return Ok(DEFAULT_PORT);
    };
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| SettingsError::InvalidEnv {
            name: PORT_ENV,
            value,
            expected: "a TCP port number",
        })
}

fn bind_host<E: Env>(env: &E) -> Result<IpAddr, SettingsError> {
    let Some(value) = optional(env, BIND_HOST_ENV) else {
        return Ok(DEFAULT_BIND_HOST);
    };
    value
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| SettingsError::InvalidEnv {
            name: BIND_HOST_ENV,
            value,
            expected: "an IP address",
        })
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
