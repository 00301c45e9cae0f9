//! Port for checking that backing storage is reachable.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by storage probes.
    pub enum StorageProbeError {
        /// Storage could not be reached.
        Unavailable { message: String } => "storage unavailable: {message}",
    }
}

/// Port used by health endpoints to check storage reachability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProbe: Send + Sync {
    /// Succeed when storage answers a trivial round trip.
    async fn ping(&self) -> Result<(), StorageProbeError>;
}

/// Fixture probe that always reports storage as reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStorageProbe;

#[async_trait]
impl StorageProbe for FixtureStorageProbe {
    async fn ping(&self) -> Result<(), StorageProbeError> {
        Ok(())
    }
}
