//! Server harness and shared world for the task endpoint behaviour suite.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use async_trait::async_trait;
use awc::Client;
use rstest::fixture;
use serde_json::Value;
use task_backend::Trace;
use task_backend::domain::ports::{
    StorageProbe, StorageProbeError, TaskRepository, TaskRepositoryError,
};
use task_backend::domain::{NewTask, Task, TaskChanges, TaskId, TaskPage};
use task_backend::inbound::http::health::{self, HealthState};
use task_backend::inbound::http::state::HttpState;
use task_backend::inbound::http::{route_not_found, tasks};
use task_backend::middleware::trace::TRACE_ID_HEADER;
use task_backend::test_support::InMemoryTaskRepository;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// In-memory store whose storage can be switched off mid-scenario.
#[derive(Default)]
pub(crate) struct SwitchableStore {
    tasks: InMemoryTaskRepository,
    offline: AtomicBool,
}

impl SwitchableStore {
    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::Release);
    }

    pub(crate) fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn check(&self) -> Result<(), TaskRepositoryError> {
        if self.offline.load(Ordering::Acquire) {
            Err(TaskRepositoryError::connection("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TaskRepository for SwitchableStore {
    async fn insert(&self, task: &NewTask) -> Result<Task, TaskRepositoryError> {
        self.check()?;
        self.tasks.insert(task).await
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        self.check()?;
        self.tasks.find_by_id(id).await
    }

    async fn list(&self, page: TaskPage) -> Result<Vec<Task>, TaskRepositoryError> {
        self.check()?;
        self.tasks.list(page).await
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        self.check()?;
        self.tasks.update(id, changes).await
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        self.check()?;
        self.tasks.delete(id).await
    }
}

#[async_trait]
impl StorageProbe for SwitchableStore {
    async fn ping(&self) -> Result<(), StorageProbeError> {
        self.check()
            .map_err(|err| StorageProbeError::unavailable(err.to_string()))
    }
}

pub(crate) struct TaskWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: Arc<SwitchableStore>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_created: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<TaskWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we hold the
    // world borrow while calling `block_on`. The future must not borrow it.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

struct CapturedResponse {
    status: u16,
    trace_id: Option<String>,
    body: Option<Value>,
}

/// Send a request and record status, trace header, and JSON body.
pub(crate) fn perform_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let path = path.to_owned();
    let captured = with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("body");
        let body = (!body.is_empty())
            .then(|| serde_json::from_slice::<Value>(&body).expect("json body"));
        CapturedResponse {
            status,
            trace_id,
            body,
        }
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = captured.body;
}

async fn spawn_task_server(store: Arc<SwitchableStore>) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(HttpState::with_repository(store.clone(), store));
    let health_data = web::Data::new(HealthState::new());
    health_data.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health_data.clone())
            .wrap(Trace)
            .configure(tasks::configure)
            .configure(health::configure)
            .default_service(web::to(route_not_found))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    (runtime, LocalSet::new())
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let store = Arc::new(SwitchableStore::default());

    let (base_url, server) = local
        .block_on(&runtime, spawn_task_server(store.clone()))
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(TaskWorld {
            runtime,
            local,
            base_url,
            server,
            store,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            last_created: None,
        })),
    }
}
