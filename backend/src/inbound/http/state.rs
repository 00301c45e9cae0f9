//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::TaskService;
use crate::domain::ports::{StorageProbe, TaskRepository, TasksCommand, TasksQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tasks: Arc<dyn TasksCommand>,
    pub tasks_query: Arc<dyn TasksQuery>,
    pub storage: Arc<dyn StorageProbe>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        tasks: Arc<dyn TasksCommand>,
        tasks_query: Arc<dyn TasksQuery>,
        storage: Arc<dyn StorageProbe>,
    ) -> Self {
        Self {
            tasks,
            tasks_query,
            storage,
        }
    }

    /// Wire both task ports to one [`TaskService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use task_backend::domain::ports::FixtureStorageProbe;
    /// use task_backend::inbound::http::state::HttpState;
    /// use task_backend::test_support::InMemoryTaskRepository;
    ///
    /// let state = HttpState::with_repository(
    ///     Arc::new(InMemoryTaskRepository::default()),
    ///     Arc::new(FixtureStorageProbe),
    /// );
    /// # let _ = state;
    /// ```
    pub fn with_repository<R>(repository: Arc<R>, storage: Arc<dyn StorageProbe>) -> Self
    where
        R: TaskRepository + 'static,
    {
        let service = Arc::new(TaskService::new(repository));
        Self::new(service.clone(), service, storage)
    }
}
