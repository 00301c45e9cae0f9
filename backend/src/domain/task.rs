//! Task aggregate and its validated value types.
//!
//! A task is the only persisted entity. Identity and timestamps are assigned
//! by the storage boundary; everything else arrives through validated
//! newtypes so invalid titles or descriptions cannot be constructed.

use chrono::{DateTime, Utc};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Validation errors raised by task value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Identifiers are positive integers.
    #[error("task id must be a positive integer")]
    NonPositiveId,
    /// Titles need at least one character.
    #[error("title must contain at least 1 character")]
    EmptyTitle,
    /// Title exceeds [`TITLE_MAX_CHARS`].
    #[error("title must contain at most {max} characters")]
    TitleTooLong { max: usize },
    /// Description exceeds [`DESCRIPTION_MAX_CHARS`].
    #[error("description must contain at most {max} characters")]
    DescriptionTooLong { max: usize },
    /// `updated_at` precedes `created_at`.
    #[error("updated_at must not precede created_at")]
    UpdatedBeforeCreated,
}

/// System-assigned task identifier.
///
/// # Examples
/// ```
/// use task_backend::domain::TaskId;
///
/// assert_eq!(TaskId::new(7).map(TaskId::get), Ok(7));
/// assert!(TaskId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i64);

impl TaskId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Errors
    /// Returns [`TaskValidationError::NonPositiveId`] for values below one.
    pub const fn new(value: i64) -> Result<Self, TaskValidationError> {
        if value < 1 {
            return Err(TaskValidationError::NonPositiveId);
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title holding 1 to [`TITLE_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validate a title.
    ///
    /// Length is counted in Unicode scalar values. Whitespace is preserved.
    ///
    /// # Errors
    /// Returns [`TaskValidationError::EmptyTitle`] or
    /// [`TaskValidationError::TitleTooLong`].
    ///
    /// # Examples
    /// ```
    /// use task_backend::domain::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let value = value.into();
        let length = value.chars().count();
        if length == 0 {
            return Err(TaskValidationError::EmptyTitle);
        }
        if length > TITLE_MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Optional free-text description holding at most
/// [`DESCRIPTION_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Validate a description. Empty strings are allowed.
    ///
    /// # Errors
    /// Returns [`TaskValidationError::DescriptionTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let value = value.into();
        if value.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(TaskValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Input for constructing a [`Task`].
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A stored task.
///
/// ## Invariants
/// - `updated_at`, when present, is not earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task from a draft, checking the timestamp invariant.
    ///
    /// # Errors
    /// Returns [`TaskValidationError::UpdatedBeforeCreated`] when the update
    /// timestamp precedes creation.
    pub fn new(draft: TaskDraft) -> Result<Self, TaskValidationError> {
        let TaskDraft {
            id,
            title,
            description,
            completed,
            created_at,
            updated_at,
        } = draft;
        if updated_at.is_some_and(|updated| updated < created_at) {
            return Err(TaskValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id,
            title,
            description,
            completed,
            created_at,
            updated_at,
        })
    }

    /// Task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Optional description.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent update, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub completed: bool,
}

impl NewTask {
    /// Create input with no description and `completed = false`.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            completed: false,
        }
    }
}

/// Partial update applied to an existing task.
///
/// `None` means the field was not supplied and stays unchanged. For
/// `description`, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<TaskTitle>,
    pub description: Option<Option<TaskDescription>>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Return true when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Errors raised when building a [`TaskPage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskPageError {
    /// `skip` is negative.
    #[error("skip must be greater than or equal to 0")]
    NegativeSkip,
    /// `limit` is below one.
    #[error("limit must be greater than or equal to {min}")]
    LimitTooSmall { min: i64 },
    /// `limit` exceeds the maximum page size.
    #[error("limit must be less than or equal to {max}")]
    LimitTooLarge { max: i64 },
}

/// Offset window over tasks ordered by identifier.
///
/// # Examples
/// ```
/// use task_backend::domain::TaskPage;
///
/// let page = TaskPage::default();
/// assert_eq!((page.skip(), page.limit()), (0, 100));
/// assert!(TaskPage::new(0, 101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPage {
    skip: i64,
    limit: i64,
}

impl TaskPage {
    /// Default number of rows skipped.
    pub const DEFAULT_SKIP: i64 = 0;
    /// Default and maximum page size.
    pub const MAX_LIMIT: i64 = 100;

    /// Validate page bounds.
    ///
    /// # Errors
    /// Returns a [`TaskPageError`] naming the violated bound.
    pub const fn new(skip: i64, limit: i64) -> Result<Self, TaskPageError> {
        if let Err(err) = Self::check_skip(skip) {
            return Err(err);
        }
        if let Err(err) = Self::check_limit(limit) {
            return Err(err);
        }
        Ok(Self { skip, limit })
    }

    /// Check the offset on its own.
    ///
    /// # Errors
    /// [`TaskPageError::NegativeSkip`] when `skip` is below zero.
    pub const fn check_skip(skip: i64) -> Result<i64, TaskPageError> {
        if skip < 0 {
            return Err(TaskPageError::NegativeSkip);
        }
        Ok(skip)
    }

    /// Check the page size on its own.
    ///
    /// # Errors
    /// [`TaskPageError::LimitTooSmall`] or [`TaskPageError::LimitTooLarge`].
    pub const fn check_limit(limit: i64) -> Result<i64, TaskPageError> {
        if limit < 1 {
            return Err(TaskPageError::LimitTooSmall { min: 1 });
        }
        if limit > Self::MAX_LIMIT {
            return Err(TaskPageError::LimitTooLarge {
                max: Self::MAX_LIMIT,
            });
        }
        Ok(limit)
    }

    /// Rows to skip.
    #[must_use]
    pub const fn skip(self) -> i64 {
        self.skip
    }

    /// Maximum rows to return.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }
}

impl Default for TaskPage {
    fn default() -> Self {
        Self {
            skip: Self::DEFAULT_SKIP,
            limit: Self::MAX_LIMIT,
        }
    }
}
