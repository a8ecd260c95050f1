//! Storage functions over SQLite.
//!
//! Queries use the runtime-checked `query`/`query_as`/`query_scalar` forms
//! rather than `query!`, so the crate builds without a database or an offline
//! query cache. Table shapes are pinned by `migrations/` and exercised by the
//! router tests.

use sqlx::{Sqlite, Transaction};

pub mod chapters;
pub mod error;
pub mod favorites;
pub mod genres;
pub mod library;
pub mod manga;
pub mod profiles;

pub type SqliteTransaction = Transaction<'static, Sqlite>;

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
