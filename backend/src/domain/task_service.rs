//! Task domain service.
//!
//! Implements the task driving ports on top of a [`TaskRepository`]. Absent
//! rows become `NOT_FOUND` here; storage failures become `DATABASE_ERROR`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{TaskRepository, TaskRepositoryError, TasksCommand, TasksQuery};
use crate::domain::{Error, NewTask, Task, TaskChanges, TaskId, TaskPage};

fn map_repository_error(err: TaskRepositoryError) -> Error {
    error!(error = %err, "task repository operation failed");
    match err {
        TaskRepositoryError::Connection { message } => {
            Error::database(format!("task storage unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            Error::database(format!("task storage error: {message}"))
        }
    }
}

fn task_not_found(id: TaskId) -> Error {
    Error::not_found(format!("Task with ID {id} not found"))
}

/// Task service implementing [`TasksCommand`] and [`TasksQuery`].
#[derive(Clone)]
pub struct TaskService<R> {
    task_repo: Arc<R>,
}

impl<R> TaskService<R> {
    /// Create a service backed by the given repository.
    pub const fn new(task_repo: Arc<R>) -> Self {
        Self { task_repo }
    }
}

#[async_trait]
impl<R> TasksQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn list_tasks(&self, page: TaskPage) -> Result<Vec<Task>, Error> {
        self.task_repo
            .list(page)
            .await
            .map_err(map_repository_error)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, Error> {
        self.task_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| task_not_found(id))
    }
}

#[async_trait]
impl<R> TasksCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create_task(&self, task: NewTask) -> Result<Task, Error> {
        let created = self
            .task_repo
            .insert(&task)
            .await
            .map_err(map_repository_error)?;
        debug!(task_id = %created.id(), "task created");
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, changes: TaskChanges) -> Result<Task, Error> {
        let updated = self
            .task_repo
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| task_not_found(id))?;
        debug!(task_id = %id, "task updated");
        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Error> {
        let removed = self
            .task_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(task_not_found(id));
        }
        debug!(task_id = %id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
