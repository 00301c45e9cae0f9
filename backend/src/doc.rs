//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every task and health endpoint together with the
//! request, response, and error envelope schemas. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::health::HealthStatusBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::tasks::{CreateTaskRequestBody, TaskResponseBody, UpdateTaskRequestBody};
use crate::inbound::http::validation::ValidationIssue;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task service API",
        description = "Create, read, update, and delete tasks.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateTaskRequestBody,
        UpdateTaskRequestBody,
        TaskResponseBody,
        HealthStatusBody,
        ErrorSchema,
        ErrorCode,
        ValidationIssue
    )),
    tags(
        (name = "tasks", description = "Task management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/tasks")]
    #[case("/tasks/{task_id}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn task_item_path_has_three_operations() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/tasks/{task_id}").expect("task item path");
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn error_schema_exposes_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("ErrorResponse").expect("error schema"));
        assert!(fields.contains(&"detail".to_owned()));
        assert!(fields.contains(&"code".to_owned()));
    }

    #[rstest]
    fn task_schema_exposes_every_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("TaskResponseBody").expect("task schema"));
        for field in ["id", "title", "description", "completed", "created_at", "updated_at"] {
            assert!(fields.contains(&field.to_owned()), "missing {field}");
        }
    }
}
