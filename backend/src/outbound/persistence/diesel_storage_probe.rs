//! Storage probe issuing `SELECT 1` over a pooled connection.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StorageProbe, StorageProbeError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// Diesel-backed implementation of the storage probe port.
#[derive(Clone)]
pub struct DieselStorageProbe {
    pool: DbPool,
}

impl DieselStorageProbe {
    /// Create a probe over the given pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageProbe for DieselStorageProbe {
    async fn ping(&self) -> Result<(), StorageProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, StorageProbeError::unavailable))?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    StorageProbeError::unavailable,
                    StorageProbeError::unavailable,
                )
            })?;
        Ok(())
    }
}
