//! Driving port for task mutations.
//!
//! Inbound adapters create, update, and delete tasks through this port
//! without depending on repository details.

use async_trait::async_trait;

use crate::domain::{Error, NewTask, Task, TaskChanges, TaskId};

/// Driving port for task write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksCommand: Send + Sync {
    /// Create a task and return it as stored.
    async fn create_task(&self, task: NewTask) -> Result<Task, Error>;

    /// Apply a partial update.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is unknown.
    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> Result<Task, Error>;

    /// Delete a task.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is unknown.
    async fn delete_task(&self, id: TaskId) -> Result<(), Error>;
}
