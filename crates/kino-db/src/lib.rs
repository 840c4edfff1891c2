//! Database layer for the kino blog.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and the embedded SQL migrations that create the blog schema: users,
//! categories, posts, comments, tags and the post/tag association table.
//!
//! The schema is created idempotently: every migration is recorded in
//! `_kino_migrations` and skipped on later startups, so opening an existing
//! database file never touches its data.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError, MIGRATION_COUNT};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
