//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`TaskRepository`, `StorageProbe`) are implemented by
//! outbound adapters; driving ports (`TasksCommand`, `TasksQuery`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod storage_probe;
mod task_repository;
mod tasks_command;
mod tasks_query;

#[cfg(test)]
pub use storage_probe::MockStorageProbe;
pub use storage_probe::{FixtureStorageProbe, StorageProbe, StorageProbeError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
#[cfg(test)]
pub use tasks_command::MockTasksCommand;
pub use tasks_command::TasksCommand;
#[cfg(test)]
pub use tasks_query::MockTasksQuery;
pub use tasks_query::TasksQuery;
