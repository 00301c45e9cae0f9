//! Task HTTP handlers.
//!
//! ```text
//! GET    /tasks
//! GET    /tasks/{task_id}
//! POST   /tasks
//! PATCH  /tasks/{task_id}
//! DELETE /tasks/{task_id}
//! ```
//!
//! Other methods on these paths answer `405 METHOD_NOT_ALLOWED` with an
//! `Allow` header.
//!
//! Handlers parse request DTOs into validated domain values, collecting every
//! field issue before calling the task ports.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, delete, get, patch, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewTask, Task, TaskChanges, TaskDescription, TaskTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldIssues, FieldName, IssueKind, Source, json_error_handler, parse_page, parse_task_id,
    query_error_handler,
};

const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const COMPLETED: FieldName = FieldName::new("completed");

/// Distinguish an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request payload for creating a task. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTaskRequestBody {
    #[serde(default, deserialize_with = "present")]
    #[schema(
        value_type = String,
        required = true,
        min_length = 1,
        max_length = 100,
        example = "Buy milk"
    )]
    pub title: Option<Option<String>>,
    #[serde(default)]
    #[schema(max_length = 500, example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>, default = false)]
    pub completed: Option<Option<bool>>,
}

/// Request payload for a partial update.
///
/// Absent fields stay unchanged. `description: null` clears the description;
/// `title` and `completed` may not be null.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequestBody {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, min_length = 1, max_length = 100)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>)]
    pub completed: Option<Option<bool>>,
}

/// Task representation returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponseBody {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: Option<String>,
}

impl From<&Task> for TaskResponseBody {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().get(),
            title: task.title().as_str().to_owned(),
            description: task
                .description()
                .map(|description| description.as_str().to_owned()),
            completed: task.completed(),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().map(|updated| updated.to_rfc3339()),
        }
    }
}

/// Paging parameters for listing tasks.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Rows to skip; defaults to 0.
    #[param(value_type = Option<i64>, minimum = 0)]
    pub skip: Option<String>,
    /// Maximum rows to return; defaults to 100.
    #[param(value_type = Option<i64>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
}

fn parse_create_body(body: CreateTaskRequestBody) -> Result<NewTask, Error> {
    let mut issues = FieldIssues::default();
    let title = match body.title {
        Some(Some(raw)) => issues.check_task_value(TITLE, TaskTitle::new(raw)),
        Some(None) => {
            issues.push(
                Source::Body,
                TITLE,
                IssueKind::StringType,
                "Input should be a valid string",
            );
            None
        }
        None => {
            issues.push(Source::Body, TITLE, IssueKind::Missing, "Field required");
            None
        }
    };
    let description = body
        .description
        .and_then(|raw| issues.check_task_value(DESCRIPTION, TaskDescription::new(raw)));
    let completed = match body.completed {
        Some(Some(value)) => value,
        Some(None) => {
            issues.push(
                Source::Body,
                COMPLETED,
                IssueKind::BoolType,
                "Input should be a valid boolean",
            );
            false
        }
        None => false,
    };
    issues.finish()?;

    let Some(title) = title else {
        return Err(Error::validation("title is required"));
    };
    Ok(NewTask {
        title,
        description,
        completed,
    })
}

fn parse_update_body(body: UpdateTaskRequestBody) -> Result<TaskChanges, Error> {
    let mut issues = FieldIssues::default();
    let title = match body.title {
        None => None,
        Some(None) => {
            issues.push(
                Source::Body,
                TITLE,
                IssueKind::StringType,
                "Input should be a valid string",
            );
            None
        }
        Some(Some(raw)) => issues.check_task_value(TITLE, TaskTitle::new(raw)),
    };
    let description = match body.description {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => issues
            .check_task_value(DESCRIPTION, TaskDescription::new(raw))
            .map(Some),
    };
    let completed = match body.completed {
        None => None,
        Some(None) => {
            issues.push(
                Source::Body,
                COMPLETED,
                IssueKind::BoolType,
                "Input should be a valid boolean",
            );
            None
        }
        Some(Some(value)) => Some(value),
    };
    issues.finish()?;

    Ok(TaskChanges {
        title,
        description,
        completed,
    })
}

/// List tasks in creation order.
#[utoipa::path(
    get,
    path = "/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Tasks in ascending id order", body = [TaskResponseBody]),
        (status = 422, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    query: web::Query<ListTasksQuery>,
) -> ApiResult<web::Json<Vec<TaskResponseBody>>> {
    let ListTasksQuery { skip, limit } = query.into_inner();
    let page = parse_page(skip.as_deref(), limit.as_deref())?;
    let tasks = state.tasks_query.list_tasks(page).await?;
    Ok(web::Json(tasks.iter().map(TaskResponseBody::from).collect()))
}

/// Fetch one task.
#[utoipa::path(
    get,
    path = "/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task found", body = TaskResponseBody),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 422, description = "Invalid task identifier", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{task_id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponseBody>> {
    let id = parse_task_id(path.as_str())?;
    let task = state.tasks_query.get_task(id).await?;
    Ok(web::Json(TaskResponseBody::from(&task)))
}

/// Create a task.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use task_backend::inbound::http::tasks::create_task;
///
/// let _app = App::new().service(create_task);
/// ```
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequestBody,
    responses(
        (status = 201, description = "Task created", body = TaskResponseBody),
        (status = 422, description = "Invalid payload", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequestBody>,
) -> ApiResult<HttpResponse> {
    let new_task = parse_create_body(payload.into_inner())?;
    let task = state.tasks.create_task(new_task).await?;
    Ok(HttpResponse::Created().json(TaskResponseBody::from(&task)))
}

/// Apply a partial update to a task.
#[utoipa::path(
    patch,
    path = "/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "Task identifier")),
    request_body = UpdateTaskRequestBody,
    responses(
        (status = 200, description = "Task updated", body = TaskResponseBody),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 422, description = "Invalid identifier or payload", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/tasks/{task_id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequestBody>,
) -> ApiResult<web::Json<TaskResponseBody>> {
    let id = parse_task_id(path.as_str())?;
    let changes = parse_update_body(payload.into_inner())?;
    let task = state.tasks.update_task(id, changes).await?;
    Ok(web::Json(TaskResponseBody::from(&task)))
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 422, description = "Invalid task identifier", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{task_id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_task_id(path.as_str())?;
    state.tasks.delete_task(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the task routes and their extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use task_backend::inbound::http::tasks;
///
/// let _app = App::new().configure(tasks::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(list_tasks)
        .service(create_task)
        .service(get_task)
        .service(update_task)
        .service(delete_task)
        .service(web::resource("/tasks").to(collection_method_not_allowed))
        .service(web::resource("/tasks/{task_id}").to(item_method_not_allowed));
}

/// Answer a known task path requested with an unsupported method.
fn method_not_allowed(req: &HttpRequest, allow: &'static str) -> HttpResponse {
    let mut response = Error::method_not_allowed(format!(
        "Method {} not allowed for {}",
        req.method(),
        req.path()
    ))
    .error_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

async fn collection_method_not_allowed(req: HttpRequest) -> HttpResponse {
    method_not_allowed(&req, "GET, POST")
}

async fn item_method_not_allowed(req: HttpRequest) -> HttpResponse {
    method_not_allowed(&req, "GET, PATCH, DELETE")
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
