//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskId, TaskPage};

/// Driving port for task read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksQuery: Send + Sync {
    /// List tasks in creation order within the page window.
    async fn list_tasks(&self, page: TaskPage) -> Result<Vec<Task>, Error>;

    /// Fetch one task.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is unknown.
    async fn get_task(&self, id: TaskId) -> Result<Task, Error>;
}
