//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters translating between Diesel rows and domain tasks, backed by
//! `diesel-async` connections pooled through `bb8`. Row structs and the table
//! definition are internal; every failure leaves as a port error.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use task_backend::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tasks")).await?;
//! let repo = DieselTaskRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_error_mapping;
mod diesel_storage_probe;
mod diesel_task_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_storage_probe::DieselStorageProbe;
pub use diesel_task_repository::DieselTaskRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
