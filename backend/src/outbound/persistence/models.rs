//! Internal Diesel row structs for the tasks table.
//!
//! These types never leave the persistence layer; rows are converted into
//! validated domain tasks before they are returned.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::tasks;

/// Row struct for reading from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset applying only the supplied task fields.
///
/// `None` leaves a column untouched. For `description`, `Some(None)` writes
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub(crate) struct TaskChangesRow<'a> {
    pub title: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub completed: Option<bool>,
}
