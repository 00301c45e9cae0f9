//! Domain primitives, ports, and services.
//!
//! Purpose: define the task aggregate, the transport-agnostic error type, and
//! the service implementing the task use-cases. Adapters depend on this module;
//! it depends on no adapter.
//!
//! Public surface:
//! - Error / ErrorCode: tagged failure kinds mapped to transports at the edge.
//! - Task and its value types (TaskId, TaskTitle, TaskDescription, TaskPage).
//! - TaskService: implements the `TasksCommand` and `TasksQuery` ports.

pub mod error;
pub mod ports;
pub mod task;
mod task_service;

pub use self::error::{Error, ErrorCode};
pub use self::task::{
    DESCRIPTION_MAX_CHARS, NewTask, TITLE_MAX_CHARS, Task, TaskChanges, TaskDescription,
    TaskDraft, TaskId, TaskPage, TaskPageError, TaskTitle, TaskValidationError,
};
pub use self::task_service::TaskService;
