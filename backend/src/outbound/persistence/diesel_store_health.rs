//! Readiness probe for the PostgreSQL store.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreHealth, StoreHealthError};

use super::pool::DbPool;

/// Checks that a pooled connection can run a trivial query.
#[derive(Clone)]
pub struct DieselStoreHealth {
    pool: DbPool,
}

impl DieselStoreHealth {
    /// Create a probe over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for DieselStoreHealth {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| StoreHealthError::unavailable(err.to_string()))?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| StoreHealthError::unavailable(err.to_string()))
    }
}
