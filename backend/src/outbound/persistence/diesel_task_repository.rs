//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Timestamps come from the injected clock. Updates run as a single
//! `UPDATE ... RETURNING` so a missing row and a changed row are told apart
//! without a second round trip.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Timestamptz};
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::warn;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{
    NewTask, Task, TaskChanges, TaskDescription, TaskDraft, TaskId, TaskPage, TaskTitle,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTaskRow, TaskChangesRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselTaskRepository {
    /// Create a repository that stamps rows using `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn pool_error(error: PoolError) -> TaskRepositoryError {
    map_pool_error(error, TaskRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    map_diesel_error(
        error,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

/// Convert a stored row into a validated domain task.
fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let TaskRow {
        id,
        title,
        description,
        completed,
        created_at,
        updated_at,
    } = row;

    let invalid = |err: crate::domain::TaskValidationError| {
        warn!(task_id = id, error = %err, "stored task row failed validation");
        TaskRepositoryError::query(format!("invalid task row {id}: {err}"))
    };

    Task::new(TaskDraft {
        id: TaskId::new(id).map_err(invalid)?,
        title: TaskTitle::new(title).map_err(invalid)?,
        description: description
            .map(TaskDescription::new)
            .transpose()
            .map_err(invalid)?,
        completed,
        created_at,
        updated_at,
    })
    .map_err(invalid)
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewTaskRow {
            title: task.title.as_str(),
            description: task.description.as_ref().map(TaskDescription::as_str),
            completed: task.completed,
            created_at: self.clock.utc(),
        };

        let stored: TaskRow = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_task(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<TaskRow> = tasks::table
            .find(id.get())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_task).transpose()
    }

    async fn list(&self, page: TaskPage) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::id.asc())
            .offset(page.skip())
            .limit(page.limit())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changeset = TaskChangesRow {
            title: changes.title.as_ref().map(TaskTitle::as_str),
            description: changes
                .description
                .as_ref()
                .map(|value| value.as_ref().map(TaskDescription::as_str)),
            completed: changes.completed,
        };

        // GREATEST keeps updated_at >= created_at if the clock steps backwards.
        let updated_at = sql::<Nullable<Timestamptz>>("GREATEST(")
            .bind::<Timestamptz, _>(self.clock.utc())
            .sql(", created_at)");

        let row: Option<TaskRow> = diesel::update(tasks::table.find(id.get()))
            .set((changeset, tasks::updated_at.eq(updated_at)))
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_task).transpose()
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = diesel::delete(tasks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(removed > 0)
    }
}
