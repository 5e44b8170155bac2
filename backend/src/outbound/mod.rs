//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **sms**: Twilio-backed SMS gateway using reqwest
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod sms;
