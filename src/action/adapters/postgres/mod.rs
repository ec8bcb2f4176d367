//! `PostgreSQL` adapters for action lifecycle persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ActionPgPool, PostgresActionRepository, PostgresProfileRepository};
