//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Task records.
    ///
    /// `id` is a `BIGSERIAL` primary key assigned on insert.
    tasks (id) {
        /// Primary key, assigned by the sequence.
        id -> Int8,
        /// Title, 1 to 100 characters.
        title -> Varchar,
        /// Optional description, at most 500 characters.
        description -> Nullable<Varchar>,
        /// Completion flag, defaults to false.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Timestamp of the most recent update; null until first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
