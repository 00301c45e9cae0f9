//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskChanges, TaskDraft, TaskId, TaskPage};

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock by `seconds`, which may be negative.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Task>,
}

/// In-memory task repository with sequential identifiers.
///
/// Mirrors the PostgreSQL adapter: ids start at 1 and are never reused,
/// listing is ordered by id, and `updated_at` never precedes `created_at`.
pub struct InMemoryTaskRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryTaskRepository {
    /// Create a repository stamping rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_store().rows.len()
    }

    /// Return true when no task is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_store(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn rebuild(task: &Task, draft: TaskDraft) -> Result<Task, TaskRepositoryError> {
    Task::new(draft).map_err(|err| {
        TaskRepositoryError::query(format!("invalid task {}: {err}", task.id()))
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError> {
        let mut store = self.lock_store();
        store.next_id += 1;
        let id = TaskId::new(store.next_id)
            .map_err(|err| TaskRepositoryError::query(err.to_string()))?;
        let stored = Task::new(TaskDraft {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: self.clock.utc(),
            updated_at: None,
        })
        .map_err(|err| TaskRepositoryError::query(err.to_string()))?;
        store.rows.insert(id.get(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(self.lock_store().rows.get(&id.get()).cloned())
    }

    async fn list(&self, page: TaskPage) -> Result<Vec<Task>, TaskRepositoryError> {
        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(0);
        Ok(self
            .lock_store()
            .rows
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut store = self.lock_store();
        let Some(current) = store.rows.get(&id.get()) else {
            return Ok(None);
        };
        let created_at = current.created_at();
        let updated = rebuild(
            current,
            TaskDraft {
                id,
                title: changes
                    .title
                    .clone()
                    .unwrap_or_else(|| current.title().clone()),
                description: changes
                    .description
                    .clone()
                    .unwrap_or_else(|| current.description().cloned()),
                completed: changes.completed.unwrap_or(current.completed()),
                created_at,
                updated_at: Some(self.clock.utc().max(created_at)),
            },
        )?;
        store.rows.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        Ok(self.lock_store().rows.remove(&id.get()).is_some())
    }
}

/// Repository whose every call fails, for exercising storage error paths.
#[derive(Debug, Clone)]
pub struct FailingTaskRepository {
    error: TaskRepositoryError,
}

impl FailingTaskRepository {
    /// Fail every call with `error`.
    #[must_use]
    pub const fn new(error: TaskRepositoryError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TaskRepository for FailingTaskRepository {
    async fn insert(&self, _task: &NewTask) -> Result<Task, TaskRepositoryError> {
        Err(self.error.clone())
    }

    async fn find_by_id(&self, _id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        Err(self.error.clone())
    }

    async fn list(&self, _page: TaskPage) -> Result<Vec<Task>, TaskRepositoryError> {
        Err(self.error.clone())
    }

    async fn update(
        &self,
        _id: TaskId,
        _changes: &TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        Err(self.error.clone())
    }

    async fn delete(&self, _id: TaskId) -> Result<bool, TaskRepositoryError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory double.

    use rstest::rstest;

    use super::*;
    use crate::domain::TaskTitle;

    fn new_task(title: &str) -> NewTask {
        NewTask::new(TaskTitle::new(title).expect("valid title"))
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = InMemoryTaskRepository::default();
        let first = repo.insert(&new_task("a")).await.expect("insert");
        assert!(repo.delete(first.id()).await.expect("delete"));
        let second = repo.insert(&new_task("b")).await.expect("insert");

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn update_clamps_to_creation_time() {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let repo = InMemoryTaskRepository::with_clock(clock.clone());
        let created = repo.insert(&new_task("a")).await.expect("insert");
        clock.advance_seconds(-60);

        let updated = repo
            .update(
                created.id(),
                &TaskChanges {
                    completed: Some(true),
                    ..TaskChanges::default()
                },
            )
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.updated_at(), Some(created.created_at()));
    }
}
