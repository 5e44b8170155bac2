//! Port reporting whether the backing store is reachable.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by store health probes.
    pub enum StoreHealthError {
        /// The store could not be reached.
        Unavailable { message: String } => "store unavailable: {message}",
    }
}

/// Liveness check against the persistence layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}

/// Fixture probe that always reports a healthy store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealth;

#[async_trait]
impl StoreHealth for FixtureStoreHealth {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        Ok(())
    }
}
