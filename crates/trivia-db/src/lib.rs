//! Database layer for the trivia API.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations. Both tables served by the API — `categories`
//! and `questions` — are created through versioned migrations managed by
//! this crate, and the category reference data is seeded the same way.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: the question bank is a single-file store with
//!   no external database process. WAL mode allows concurrent readers with a
//!   single writer, which matches the read-heavy access pattern.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, ensuring schema and seed data ship with the server and
//!   cannot drift from the code that depends on them.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
