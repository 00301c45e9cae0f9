//! Port for task persistence.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskChanges, TaskId, TaskPage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "task repository query failed: {message}",
    }
}

/// Port for storing and reading tasks.
///
/// Adapters assign identifiers and timestamps. Absence is reported through
/// `Option`/`bool` results rather than errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task and return the stored row.
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError>;

    /// Find a task by id.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError>;

    /// List tasks in ascending id order within the page window.
    async fn list(&self, page: TaskPage) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Apply supplied fields and refresh `updated_at`.
    ///
    /// Returns `None` when no task has `id`.
    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    /// Remove a task, reporting whether a row existed.
    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn query_error_formats_message() {
        let err = TaskRepositoryError::query("broken sql");
        assert_eq!(err.to_string(), "task repository query failed: broken sql");
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = TaskRepositoryError::connection("refused");
        assert!(err.to_string().contains("connection failed: refused"));
    }
}
