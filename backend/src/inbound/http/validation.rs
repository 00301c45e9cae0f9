//! Request validation helpers for inbound HTTP adapters.
//!
//! Field problems are collected as [`ValidationIssue`]s and reported together
//! in a single `VALIDATION_ERROR`. Extractor failures (bad JSON, wrong content
//! type, malformed query strings) are funnelled into the same shape.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, TaskId, TaskPage, TaskPageError, TaskValidationError};

/// Machine-readable issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IssueKind {
    Missing,
    StringTooShort,
    StringTooLong,
    StringType,
    BoolType,
    IntParsing,
    GreaterThan,
    GreaterThanEqual,
    LessThanEqual,
    JsonInvalid,
    ContentType,
}

impl IssueKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::StringTooShort => "string_too_short",
            Self::StringTooLong => "string_too_long",
            Self::StringType => "string_type",
            Self::BoolType => "bool_type",
            Self::IntParsing => "int_parsing",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanEqual => "greater_than_equal",
            Self::LessThanEqual => "less_than_equal",
            Self::JsonInvalid => "json_invalid",
            Self::ContentType => "content_type",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Where a request value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Body,
    Path,
    Query,
}

impl Source {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationIssue {
    /// Location path, e.g. `["body", "title"]`.
    #[schema(example = json!(["body", "title"]))]
    pub loc: Vec<String>,
    /// Human-readable description.
    pub msg: String,
    /// Issue category.
    #[serde(rename = "type")]
    #[schema(example = "string_too_short")]
    pub kind: String,
}

impl ValidationIssue {
    fn new(loc: Vec<String>, kind: IssueKind, msg: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.as_str().to_owned(),
        }
    }

    fn at(
        source: Source,
        field: Option<FieldName>,
        kind: IssueKind,
        msg: impl Into<String>,
    ) -> Self {
        let mut loc = vec![source.as_str().to_owned()];
        if let Some(name) = field {
            loc.push(name.as_str().to_owned());
        }
        Self::new(loc, kind, msg)
    }
}

/// Accumulator for validation issues found in one request.
#[derive(Debug, Default)]
pub(crate) struct FieldIssues(Vec<ValidationIssue>);

impl FieldIssues {
    pub(crate) fn push(
        &mut self,
        source: Source,
        field: FieldName,
        kind: IssueKind,
        msg: impl Into<String>,
    ) {
        self.0
            .push(ValidationIssue::at(source, Some(field), kind, msg));
    }

    /// Record a failed domain conversion and return the value on success.
    pub(crate) fn check_task_value<T>(
        &mut self,
        field: FieldName,
        result: Result<T, TaskValidationError>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(Source::Body, field, task_issue_kind(&err), err.to_string());
                None
            }
        }
    }

    /// Succeed when no issue was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(validation_error(self.0))
        }
    }
}

const fn task_issue_kind(err: &TaskValidationError) -> IssueKind {
    match err {
        TaskValidationError::EmptyTitle => IssueKind::StringTooShort,
        TaskValidationError::TitleTooLong { .. }
        | TaskValidationError::DescriptionTooLong { .. } => IssueKind::StringTooLong,
        TaskValidationError::NonPositiveId => IssueKind::GreaterThan,
        TaskValidationError::UpdatedBeforeCreated => IssueKind::JsonInvalid,
    }
}

fn validation_error(issues: Vec<ValidationIssue>) -> Error {
    Error::validation("Request validation failed").with_details(json!(issues))
}

/// Parse a task identifier from the raw path segment.
///
/// Non-integers and values below one are validation failures.
pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    let field = FieldName::new("task_id");
    let issue = match raw.parse::<i64>() {
        Ok(value) => match TaskId::new(value) {
            Ok(id) => return Ok(id),
            Err(_) => ValidationIssue::at(
                Source::Path,
                Some(field),
                IssueKind::GreaterThan,
                "Input should be greater than 0",
            ),
        },
        Err(_) => ValidationIssue::at(
            Source::Path,
            Some(field),
            IssueKind::IntParsing,
            "Input should be a valid integer",
        ),
    };
    Err(validation_error(vec![issue]))
}

/// Build a page window from raw query values, reporting every problem at
/// once with the offending parameter in its location.
pub(crate) fn parse_page(skip: Option<&str>, limit: Option<&str>) -> Result<TaskPage, Error> {
    let mut issues = FieldIssues::default();
    let skip = issues.check_page_value(
        FieldName::new("skip"),
        skip,
        TaskPage::DEFAULT_SKIP,
        TaskPage::check_skip,
    );
    let limit = issues.check_page_value(
        FieldName::new("limit"),
        limit,
        TaskPage::MAX_LIMIT,
        TaskPage::check_limit,
    );
    issues.finish()?;
    match (skip, limit) {
        (Some(skip), Some(limit)) => {
            TaskPage::new(skip, limit).map_err(|err| Error::validation(err.to_string()))
        }
        _ => Err(Error::validation("Request validation failed")),
    }
}

impl FieldIssues {
    fn check_page_value(
        &mut self,
        field: FieldName,
        raw: Option<&str>,
        default: i64,
        check: fn(i64) -> Result<i64, TaskPageError>,
    ) -> Option<i64> {
        let Some(raw) = raw else {
            return Some(default);
        };
        let Ok(value) = raw.trim().parse::<i64>() else {
            self.push(
                Source::Query,
                field,
                IssueKind::IntParsing,
                "Input should be a valid integer",
            );
            return None;
        };
        match check(value) {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(Source::Query, field, page_issue_kind(&err), err.to_string());
                None
            }
        }
    }
}

const fn page_issue_kind(err: &TaskPageError) -> IssueKind {
    match err {
        TaskPageError::NegativeSkip | TaskPageError::LimitTooSmall { .. } => {
            IssueKind::GreaterThanEqual
        }
        TaskPageError::LimitTooLarge { .. } => IssueKind::LessThanEqual,
    }
}

/// Map JSON extractor failures to `VALIDATION_ERROR`.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected JSON payload");
    let issue = match &err {
        JsonPayloadError::ContentType => ValidationIssue::at(
            Source::Body,
            None,
            IssueKind::ContentType,
            "Content type must be application/json",
        ),
        JsonPayloadError::Deserialize(inner) if inner.is_data() => {
            ValidationIssue::at(Source::Body, None, IssueKind::JsonInvalid, inner.to_string())
        }
        other => ValidationIssue::at(
            Source::Body,
            None,
            IssueKind::JsonInvalid,
            format!("Invalid JSON: {other}"),
        ),
    };
    validation_error(vec![issue]).into()
}

/// Map query-string extractor failures to `VALIDATION_ERROR`.
pub(crate) fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected query string");
    let issue = ValidationIssue::at(
        Source::Query,
        None,
        IssueKind::JsonInvalid,
        format!("Malformed query string: {err}"),
    );
    validation_error(vec![issue]).into()
}
